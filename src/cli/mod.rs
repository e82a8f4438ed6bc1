//! CLI module
//!
//! Command-line interface for running the source.
//!
//! # Commands
//!
//! - `schema` - Print the output field names
//! - `check` - Test the API key against the first result page
//! - `fetch` - Stream a batch of flattened articles

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
