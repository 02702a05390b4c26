//! Query 5 evaluation: join indices, partitioning, per-partition scan, merge
//! and the fork-join pipeline that ties them together.

pub mod index;
pub mod merge;
pub mod partition;
pub mod pipeline;
pub mod worker;

pub use index::{JoinIndex, NationEntry, OrderEntry};
pub use merge::{merge_partials, QueryResult, SharedAggregate};
pub use partition::plan_partitions;
pub use pipeline::Pipeline;
pub use worker::{evaluate, scan_partition, PartialAggregate, Rejection, ScanStats};

use chrono::NaiveDate;
use serde::Serialize;

/// Region and date window the query is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParams {
    /// Matched exactly, case-sensitive
    pub region_name: String,
    /// Inclusive
    pub start_date: NaiveDate,
    /// Exclusive
    pub end_date: NaiveDate,
}

impl QueryParams {
    pub fn new(region_name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            region_name: region_name.into(),
            start_date,
            end_date,
        }
    }

    /// `start_date <= date < end_date`
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.end_date
    }
}
