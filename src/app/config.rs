//! Application configuration
//!
//! Settings that shape the process rather than the query.

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Filter directive from `Q5_LOG_LEVEL` or the config file
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            log_level: None,
        }
    }

    pub fn with_log_level(mut self, log_level: Option<String>) -> Self {
        self.log_level = log_level;
        self
    }

    /// Get the log filter; `-v` flags take precedence over a configured level
    pub fn log_level(&self) -> String {
        match (self.verbose, &self.log_level) {
            (0, Some(level)) => level.clone(),
            (0, None) => "info".to_string(),
            (1, _) => "debug".to_string(),
            (2, _) => "trace".to_string(),
            _ => "trace,tokio=debug".to_string(),
        }
    }
}
