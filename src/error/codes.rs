/// Error code registry
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Load errors
/// - 3000-3999: Execution errors
/// - 4000-4999: Sink errors
/// - 9000-9999: Other errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1004;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_INVALID_DATE: u16 = 1006;
    pub const CONFIG_INVALID_THREADS: u16 = 1007;
    pub const CONFIG_VALIDATION_FAILED: u16 = 1008;
    pub const CONFIG_EMPTY_FACT_TABLE: u16 = 1009;

    // Load errors (2000-2999)
    pub const LOAD_FILE_NOT_FOUND: u16 = 2001;
    pub const LOAD_PERMISSION_DENIED: u16 = 2002;
    pub const LOAD_IO_ERROR: u16 = 2003;

    // Execution errors (3000-3999)
    pub const EXEC_GENERIC: u16 = 3000;
    pub const EXEC_WORKER_PANICKED: u16 = 3001;
    pub const EXEC_LOCK_POISONED: u16 = 3002;
    pub const EXEC_TASK_JOIN_FAILED: u16 = 3003;
    pub const EXEC_SPAWN_FAILED: u16 = 3004;
    pub const EXEC_INCOMPLETE_MERGE: u16 = 3005;

    // Sink errors (4000-4999)
    pub const SINK_NOT_WRITABLE: u16 = 4001;
    pub const SINK_SERIALIZATION_ERROR: u16 = 4002;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1001 => "Configuration file not found",
        1002 => "Invalid TOML in configuration file",
        1004 => "Required configuration value missing",
        1005 => "Invalid configuration value",
        1006 => "Malformed calendar date",
        1007 => "Worker count out of range",
        1008 => "Configuration validation failed",
        1009 => "Fact table is empty",

        2001 => "Table file not found",
        2002 => "Permission denied reading table file",
        2003 => "I/O error while reading table file",

        3000 => "Generic execution error",
        3001 => "Worker thread panicked",
        3002 => "Aggregate lock poisoned",
        3003 => "Background task failed to join",
        3004 => "Failed to spawn worker thread",
        3005 => "Not every worker merged its partial result",

        4001 => "Result destination not writable",
        4002 => "Failed to serialize result",

        9000 => "Generic error",

        _ => "Unknown error code",
    }
}
