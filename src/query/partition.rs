//! Pure partition planning for the fact table
//!
//! Splits `[0, N)` into `T` contiguous ranges of `N / T` rows, with the
//! remainder folded into the last range.

use crate::error::{ErrorCode, Q5Error, Result};
use std::ops::Range;

/// Upper bound on worker threads per run
pub const MAX_WORKERS: usize = 1024;

/// Pure: plan `workers` contiguous ranges covering `0..rows` exactly once
pub fn plan_partitions(rows: usize, workers: usize) -> Result<Vec<Range<usize>>> {
    if workers == 0 || workers > MAX_WORKERS {
        return Err(Q5Error::config_with_code(
            ErrorCode::CONFIG_INVALID_THREADS,
            format!("worker count must be from 1 to {}, got {}", MAX_WORKERS, workers),
            Some("threads".to_string()),
        ));
    }
    if rows == 0 {
        return Err(Q5Error::config_with_code(
            ErrorCode::CONFIG_EMPTY_FACT_TABLE,
            "the lineitem table has no rows to partition",
            Some("table_path".to_string()),
        ));
    }

    let chunk = rows / workers;
    let ranges = (0..workers)
        .map(|worker| {
            let start = worker * chunk;
            let end = if worker == workers - 1 {
                rows
            } else {
                start + chunk
            };
            start..end
        })
        .collect();

    Ok(ranges)
}
