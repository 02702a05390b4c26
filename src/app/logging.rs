//! Logging configuration and initialization

use crate::app::config::AppConfig;
use crate::error::{ErrorExt, Result};
use tracing::{debug, trace};

/// Initialize tracing/logging for the application.
///
/// Logs go to stderr so stdout carries only result lines. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &AppConfig) -> Result<()> {
    let log_level = config.log_level();

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(config.verbose >= 2) // Show target module for -vv and above
        .with_thread_names(config.verbose >= 2)
        .with_thread_ids(config.verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(config.verbose >= 3) // Show line numbers for -vvv
        .try_init()
        .to_q5("could not install the log subscriber")?;

    debug!("tpch-q5 started with verbosity level: {}", config.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
    Ok(())
}
