use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::AggregationSummary;

/// Renders the summary document, compact by default
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn render(&self, summary: &AggregationSummary) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(summary)?
        } else {
            serde_json::to_string(summary)?
        };
        Ok(text)
    }

    pub fn write_to<W: Write>(&self, summary: &AggregationSummary, mut out: W) -> Result<()> {
        writeln!(out, "{}", self.render(summary)?)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_file(&self, summary: &AggregationSummary, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        self.write_to(summary, BufWriter::new(file))?;
        info!(path = %path.display(), "summary written");
        Ok(())
    }

    /// Write to `path` when given, stdout otherwise
    pub fn emit(&self, summary: &AggregationSummary, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => self.write_file(summary, path),
            None => self.write_to(summary, std::io::stdout().lock()),
        }
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}
