//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::fetch::BatchOutcome;
use crate::schema;
use crate::source::ArticleSource;
use crate::types::FlatRecord;
use serde_json::{json, Value};
use std::io::Write;

/// Stream name used in emitted record messages
const STREAM_NAME: &str = "articles";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Schema => self.schema(),
            Commands::Check { query } => self.check(query).await,
            Commands::Fetch {
                query,
                batch_size,
                fail_on_partial,
            } => self.fetch(query, *batch_size, *fail_on_partial).await,
        }
    }

    /// Load configuration, letting `--api-key` win over the file
    fn load_config(&self) -> Result<SourceConfig> {
        let mut config = match &self.cli.config {
            Some(path) => SourceConfig::from_file(path)?,
            None => SourceConfig::default(),
        };
        if let Some(key) = &self.cli.api_key {
            config.api_key.clone_from(key);
        }
        Ok(config)
    }

    /// Print the schema
    fn schema(&self) -> Result<()> {
        let fields = schema::get_schema();
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "SCHEMA",
                "schema": { "stream": STREAM_NAME, "fields": fields }
            })),
            OutputFormat::Pretty => {
                let mut out = std::io::stdout().lock();
                for field in fields {
                    writeln!(out, "{field}")?;
                }
                Ok(())
            }
        }
    }

    /// Check connection
    async fn check(&self, query: &str) -> Result<()> {
        let source = ArticleSource::new(self.load_config()?)?;

        let status = match source.check(query).await {
            Ok(count) => json!({
                "status": "SUCCEEDED",
                "message": format!("Connection successful, {count} articles on first page")
            }),
            Err(e) => json!({
                "status": "FAILED",
                "message": format!("Connection failed: {e}")
            }),
        };

        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": status
        }))
    }

    /// Fetch a batch and print every record
    async fn fetch(&self, query: &str, batch_size: usize, fail_on_partial: bool) -> Result<()> {
        let source = ArticleSource::new(self.load_config()?)?;
        let mut batch = source.fetch_batch(batch_size, query)?;

        let mut count = 0;
        while let Some(record) = batch.next().await {
            count += 1;
            self.output_record(count, &record)?;
        }

        let outcome = batch.outcome().cloned().unwrap_or(BatchOutcome::Exhausted);
        let level = if outcome.is_complete() { "INFO" } else { "WARN" };
        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": level,
                "message": format!("Fetched {count} articles for '{query}' ({outcome})")
            }
        }))?;

        match outcome {
            BatchOutcome::Failed(failure) if fail_on_partial => Err(Error::Fetch(failure)),
            _ => Ok(()),
        }
    }

    /// Output a record in the selected format
    fn output_record(&self, index: usize, record: &FlatRecord) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "RECORD",
                "record": {
                    "stream": STREAM_NAME,
                    "data": record,
                    "emitted_at": chrono::Utc::now().timestamp_millis()
                }
            })),
            OutputFormat::Pretty => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "Article {index}:")?;
                writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
                Ok(())
            }
        }
    }

    /// Output a protocol message
    fn output_message(&self, msg: &Value) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(std::io::stdout().lock(), "{line}")?;
        Ok(())
    }
}
