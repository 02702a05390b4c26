use super::{describe_error_code, ErrorCode, Q5Error};
use crate::query::partition::MAX_WORKERS;
use std::io::ErrorKind;
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to Q5Error with context
    fn to_q5(self, context: impl Into<String>) -> Result<T, Q5Error>;

    /// Convert to an execution error
    fn to_execution_error(self, message: impl Into<String>) -> Result<T, Q5Error>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_q5(self, context: impl Into<String>) -> Result<T, Q5Error> {
        self.map_err(|e| Q5Error::other(context).with_source(e))
    }

    fn to_execution_error(self, message: impl Into<String>) -> Result<T, Q5Error> {
        self.map_err(|e| Q5Error::execution(message).with_source(e))
    }
}

/// Helper functions for common error scenarios
pub mod common {
    use super::*;

    /// A required configuration value was not supplied by any layer
    pub fn missing_required_field(field: &str) -> Q5Error {
        Q5Error::config_with_code(
            ErrorCode::CONFIG_MISSING_REQUIRED,
            format!("Required value '{}' is missing", field),
            Some(field.to_string()),
        )
    }

    /// A date argument is not a valid `YYYY-MM-DD` calendar date
    pub fn invalid_date(field: &str, value: &str) -> Q5Error {
        Q5Error::config_with_code(
            ErrorCode::CONFIG_INVALID_DATE,
            format!("'{}' is not a valid YYYY-MM-DD date", value),
            Some(field.to_string()),
        )
    }

    /// Worker count is not an integer in `1..=MAX_WORKERS`
    pub fn invalid_thread_count(value: &str) -> Q5Error {
        Q5Error::config_with_code(
            ErrorCode::CONFIG_INVALID_THREADS,
            format!(
                "Worker count must be an integer from 1 to {}, got '{}'",
                MAX_WORKERS, value
            ),
            Some("threads".to_string()),
        )
    }

    /// A value outside the set a field accepts
    pub fn invalid_value(field: &str, value: &str, expected: &str) -> Q5Error {
        Q5Error::config_with_code(
            ErrorCode::CONFIG_INVALID_VALUE,
            format!("'{}' is not one of {}", value, expected),
            Some(field.to_string()),
        )
    }

    /// Map an I/O failure on a table file to a load error
    pub fn table_io_error(path: &Path, err: std::io::Error) -> Q5Error {
        let code = match err.kind() {
            ErrorKind::NotFound => ErrorCode::LOAD_FILE_NOT_FOUND,
            ErrorKind::PermissionDenied => ErrorCode::LOAD_PERMISSION_DENIED,
            _ => ErrorCode::LOAD_IO_ERROR,
        };
        Q5Error::load_with_code(
            code,
            describe_error_code(code),
            Some(path.to_path_buf()),
        )
        .with_source(err)
    }

    /// The result destination could not be written
    pub fn sink_not_writable(path: &Path, err: std::io::Error) -> Q5Error {
        Q5Error::sink_with_code(
            ErrorCode::SINK_NOT_WRITABLE,
            "destination is not writable",
            Some(path.to_path_buf()),
        )
        .with_source(err)
    }
}
