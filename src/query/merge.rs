//! Shared aggregate that worker partials are merged into
//!
//! One mutex guards the whole map. A worker takes it once, folds its entire
//! partial result in and releases it. The final result can only be taken by
//! consuming the aggregate, which the orchestrator does after every worker
//! has joined.

use super::worker::{PartialAggregate, ScanStats};
use crate::error::{ErrorCode, Q5Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Final query output: revenue per nation in ascending name order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub revenue: BTreeMap<String, f64>,
    pub stats: ScanStats,
}

#[derive(Debug, Default)]
struct AggregateState {
    revenue: BTreeMap<String, f64>,
    stats: ScanStats,
    merges: usize,
}

#[derive(Debug, Default)]
pub struct SharedAggregate {
    state: Mutex<AggregateState>,
}

impl SharedAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one worker's partial into the shared map under a single lock
    pub fn merge(&self, partial: PartialAggregate<'_>) -> Result<()> {
        let mut state = self.state.lock().map_err(|_| {
            Q5Error::execution_with_code(
                ErrorCode::EXEC_LOCK_POISONED,
                "aggregate lock poisoned by a failed merge",
                None,
            )
        })?;

        for (nation, subtotal) in partial.revenue {
            *state.revenue.entry(nation.to_string()).or_insert(0.0) += subtotal;
        }
        state.stats.absorb(&partial.stats);
        state.merges += 1;
        Ok(())
    }

    /// Consume the aggregate and return the merged result.
    ///
    /// Fails unless exactly `expected_merges` partials were folded in.
    pub fn into_result(self, expected_merges: usize) -> Result<QueryResult> {
        let state = self.state.into_inner().map_err(|_| {
            Q5Error::execution_with_code(
                ErrorCode::EXEC_LOCK_POISONED,
                "aggregate lock poisoned by a failed merge",
                None,
            )
        })?;
        if state.merges != expected_merges {
            return Err(Q5Error::execution_with_code(
                ErrorCode::EXEC_INCOMPLETE_MERGE,
                format!(
                    "{} partial results merged, expected {}",
                    state.merges, expected_merges
                ),
                None,
            ));
        }
        Ok(QueryResult {
            revenue: state.revenue,
            stats: state.stats,
        })
    }
}

/// Pure: merge partials in the given order without any locking
pub fn merge_partials<'a>(
    partials: impl IntoIterator<Item = PartialAggregate<'a>>,
) -> QueryResult {
    let mut result = QueryResult::default();
    for partial in partials {
        for (nation, subtotal) in partial.revenue {
            *result.revenue.entry(nation.to_string()).or_insert(0.0) += subtotal;
        }
        result.stats.absorb(&partial.stats);
    }
    result
}
