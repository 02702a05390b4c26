//! Result sink
//!
//! Writes the merged result to the destination directory and mirrors the
//! text lines to stdout.

use crate::error::{common, ErrorCode, Q5Error, Result};
use crate::query::QueryResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

pub const TEXT_RESULT_FILE: &str = "query5_result.txt";
pub const JSON_RESULT_FILE: &str = "query5_result.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<nation> | <revenue>` lines
    #[default]
    Text,
    /// Revenue map plus scan statistics as JSON
    Json,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Text => TEXT_RESULT_FILE,
            Self::Json => JSON_RESULT_FILE,
        }
    }
}

/// Pure: one `<nation> | <revenue>` line per nation, ascending by name
pub fn format_lines(result: &QueryResult) -> Vec<String> {
    result
        .revenue
        .iter()
        .map(|(nation, revenue)| format!("{} | {:.2}", nation, revenue))
        .collect()
}

/// Pure: render the full file body for `format`
pub fn render(result: &QueryResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut body = format_lines(result).join("\n");
            if !body.is_empty() {
                body.push('\n');
            }
            Ok(body)
        }
        OutputFormat::Json => serde_json::to_string_pretty(result).map_err(|e| {
            Q5Error::sink_with_code(
                ErrorCode::SINK_SERIALIZATION_ERROR,
                "could not serialize result",
                None,
            )
            .with_source(e)
        }),
    }
}

#[derive(Debug, Clone)]
pub struct ResultSink {
    dir: PathBuf,
    format: OutputFormat,
}

impl ResultSink {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(self.format.file_name())
    }

    /// Write the result file, then echo the text lines to stdout.
    ///
    /// The destination directory must already exist.
    pub async fn write(&self, result: &QueryResult) -> Result<PathBuf> {
        let path = self.path();
        let body = render(result, self.format)?;

        tokio::fs::write(&path, body)
            .await
            .map_err(|e| common::sink_not_writable(&path, e))?;
        debug!("Wrote {} nations to {}", result.revenue.len(), path.display());

        for line in format_lines(result) {
            println!("{}", line);
        }
        info!("Result written to {}", path.display());

        Ok(path)
    }
}
