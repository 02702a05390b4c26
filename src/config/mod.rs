//! Query configuration
//!
//! Values arrive in layers: a TOML file, then `Q5_*` environment variables,
//! then command-line flags, each overriding the one before. The merged layer
//! is validated once into a [`QueryConfig`] before any table is read.

pub mod loader;

pub use loader::load_config_file;

use crate::error::{common, ErrorCode, Q5Error, Result};
use crate::output::OutputFormat;
use crate::query::partition::MAX_WORKERS;
use crate::query::QueryParams;
use crate::store::records::DATE_FORMAT;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::warn;

pub const ENV_PREFIX: &str = "Q5_";

/// One source of configuration values; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub r_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub threads: Option<i64>,
    pub table_path: Option<PathBuf>,
    pub result_path: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl ConfigLayer {
    /// Values from `higher` win over values already in `self`
    pub fn overlay(self, higher: ConfigLayer) -> Self {
        Self {
            r_name: higher.r_name.or(self.r_name),
            start_date: higher.start_date.or(self.start_date),
            end_date: higher.end_date.or(self.end_date),
            threads: higher.threads.or(self.threads),
            table_path: higher.table_path.or(self.table_path),
            result_path: higher.result_path.or(self.result_path),
            format: higher.format.or(self.format),
            log_level: higher.log_level.or(self.log_level),
        }
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_with(|name| std::env::var(name).ok())
    }

    /// Overlay `Q5_*` variables read through `lookup`
    pub fn merge_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |key: &str| lookup(&format!("{}{}", ENV_PREFIX, key));

        if let Some(r_name) = var("R_NAME") {
            self.r_name = Some(r_name);
        }
        if let Some(start) = var("START_DATE") {
            self.start_date = Some(start);
        }
        if let Some(end) = var("END_DATE") {
            self.end_date = Some(end);
        }
        if let Some(threads) = var("THREADS") {
            let parsed = threads
                .trim()
                .parse::<i64>()
                .map_err(|_| common::invalid_thread_count(&threads))?;
            self.threads = Some(parsed);
        }
        if let Some(path) = var("TABLE_PATH") {
            self.table_path = Some(PathBuf::from(path));
        }
        if let Some(path) = var("RESULT_PATH") {
            self.result_path = Some(PathBuf::from(path));
        }
        if let Some(format) = var("FORMAT") {
            let parsed = <OutputFormat as clap::ValueEnum>::from_str(format.trim(), true)
                .map_err(|_| common::invalid_value("format", &format, "text, json"))?;
            self.format = Some(parsed);
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = Some(level);
        }
        Ok(())
    }

    /// Check every value and build the typed configuration.
    ///
    /// All problems are collected; a single problem keeps its own code.
    pub fn validate(self) -> Result<QueryConfig> {
        let mut errors = Vec::new();

        let r_name = match self.r_name.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            Some(r) => Some(r.to_string()),
            None => {
                errors.push(common::missing_required_field("r_name"));
                None
            }
        };
        let start_date = parse_date("start_date", self.start_date, &mut errors);
        let end_date = parse_date("end_date", self.end_date, &mut errors);

        let threads = match self.threads {
            None => {
                errors.push(common::missing_required_field("threads"));
                None
            }
            Some(n) => match usize::try_from(n)
                .ok()
                .filter(|&n| n <= MAX_WORKERS)
                .and_then(NonZeroUsize::new)
            {
                Some(n) => Some(n),
                None => {
                    errors.push(common::invalid_thread_count(&n.to_string()));
                    None
                }
            },
        };

        let table_path = required_path("table_path", self.table_path, &mut errors);
        let result_path = required_path("result_path", self.result_path, &mut errors);

        match (r_name, start_date, end_date, threads, table_path, result_path) {
            (Some(r_name), Some(start), Some(end), Some(threads), Some(table), Some(result))
                if errors.is_empty() =>
            {
                if start >= end {
                    warn!(
                        "start_date {} is not before end_date {}; no order can match",
                        start, end
                    );
                }
                Ok(QueryConfig {
                    params: QueryParams::new(r_name, start, end),
                    threads,
                    table_path: table,
                    result_path: result,
                    format: self.format.unwrap_or_default(),
                })
            }
            _ => Err(combine(errors)),
        }
    }
}

fn parse_date(field: &str, value: Option<String>, errors: &mut Vec<Q5Error>) -> Option<NaiveDate> {
    match value {
        None => {
            errors.push(common::missing_required_field(field));
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(common::invalid_date(field, &raw));
                None
            }
        },
    }
}

fn required_path(
    field: &str,
    value: Option<PathBuf>,
    errors: &mut Vec<Q5Error>,
) -> Option<PathBuf> {
    match value.filter(|p| !p.as_os_str().is_empty()) {
        Some(p) => Some(p),
        None => {
            errors.push(common::missing_required_field(field));
            None
        }
    }
}

fn combine(mut errors: Vec<Q5Error>) -> Q5Error {
    if errors.len() == 1 {
        return errors.remove(0);
    }
    Q5Error::config_with_code(
        ErrorCode::CONFIG_VALIDATION_FAILED,
        format!(
            "{} problems found:\n{}",
            errors.len(),
            errors
                .iter()
                .map(|e| format!("  - {}", e.user_message()))
                .collect::<Vec<_>>()
                .join("\n")
        ),
        None,
    )
}

/// Validated configuration the pipeline runs with
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfig {
    pub params: QueryParams,
    pub threads: NonZeroUsize,
    pub table_path: PathBuf,
    pub result_path: PathBuf,
    pub format: OutputFormat,
}
