//! Error handling utilities
//!
//! This module provides centralized fatal error handling for the binary.

use crate::error::Q5Error;
use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `Q5Error`: shows the user message, and the full chain in verbose mode
/// - For other errors: shows the error message and exits with 1
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    let exit_code = if let Some(q5_err) = error.downcast_ref::<Q5Error>() {
        eprintln!("{}", q5_err.user_message());

        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", q5_err.developer_message());
        }

        q5_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}
