//! Application module
//!
//! This module contains application-level functionality including:
//! - Process-level settings
//! - Logging setup
//! - Fatal error reporting
//! - The query run itself

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
pub use runtime::run_query;
