//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Article search source CLI
#[derive(Parser, Debug)]
#[command(name = "nyt-source")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API key, overrides the config file
    #[arg(long, env = "NYT_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the output schema
    Schema,

    /// Test the API key against the first page of a query
    Check {
        /// Search query
        #[arg(short, long, default_value = "news")]
        query: String,
    },

    /// Fetch a batch of flattened articles
    Fetch {
        /// Search query
        #[arg(short, long)]
        query: String,

        /// Approximate number of articles (rounded up to whole pages)
        #[arg(short, long, default_value = "20")]
        batch_size: usize,

        /// Exit non-zero if a page fetch fails partway
        #[arg(long)]
        fail_on_partial: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from([
            "nyt-source",
            "--api-key",
            "k",
            "fetch",
            "--query",
            "Silicon Valley",
            "--batch-size",
            "15",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Fetch {
                query,
                batch_size,
                fail_on_partial,
            } => {
                assert_eq!(query, "Silicon Valley");
                assert_eq!(batch_size, 15);
                assert!(!fail_on_partial);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nyt-source", "schema", "--format", "pretty", "-v"]).unwrap();

        assert!(matches!(cli.command, Commands::Schema));
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(cli.verbose);
    }

    #[test]
    fn test_fetch_requires_query() {
        assert!(Cli::try_parse_from(["nyt-source", "fetch"]).is_err());
    }
}
