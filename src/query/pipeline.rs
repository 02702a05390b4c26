//! Fork-join orchestration of the Query 5 pipeline
//!
//! Builds the join indices, plans one partition per worker, starts exactly
//! that many scoped threads, and returns the merged result once every worker
//! has joined.

use super::index::JoinIndex;
use super::merge::{QueryResult, SharedAggregate};
use super::partition::plan_partitions;
use super::worker::{scan_partition, ScanStats};
use super::QueryParams;
use crate::error::{ErrorCode, Q5Error, Result};
use crate::store::{LineItem, RecordStore};
use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;
use tracing::{debug, info, trace};

#[derive(Debug, Clone)]
pub struct Pipeline {
    params: QueryParams,
    workers: NonZeroUsize,
}

impl Pipeline {
    pub fn new(params: QueryParams, workers: NonZeroUsize) -> Self {
        Self { params, workers }
    }

    /// Build indices from `store` and run the parallel scan
    pub fn execute(&self, store: &RecordStore) -> Result<QueryResult> {
        let started = Instant::now();
        let index = JoinIndex::build(store);
        debug!("Join indices built in {:?}", started.elapsed());

        if !index.has_region_named(&self.params.region_name) {
            debug!(
                "Region '{}' is not among the loaded regions; no line item can match",
                self.params.region_name
            );
        }

        self.execute_with_index(&store.line_items, &index)
    }

    /// Run the parallel scan over `items` against prebuilt indices
    pub fn execute_with_index(
        &self,
        items: &[LineItem],
        index: &JoinIndex,
    ) -> Result<QueryResult> {
        let ranges = plan_partitions(items.len(), self.workers.get())?;
        let worker_count = ranges.len();
        let shared = SharedAggregate::new();
        let started = Instant::now();

        info!(
            "Scanning {} line items with {} workers",
            items.len(),
            ranges.len()
        );

        thread::scope(|scope| {
            let mut first_error: Option<Q5Error> = None;
            let mut handles = Vec::with_capacity(ranges.len());

            for (worker, range) in ranges.into_iter().enumerate() {
                let slice = &items[range.clone()];
                let shared = &shared;
                let params = &self.params;

                let spawned = thread::Builder::new()
                    .name(format!("q5-worker-{}", worker))
                    .spawn_scoped(scope, move || -> Result<ScanStats> {
                        trace!("Worker {} scanning rows {:?}", worker, range);
                        let partial = scan_partition(slice, index, params);
                        let stats = partial.stats;
                        shared.merge(partial)?;
                        Ok(stats)
                    });

                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(e) => {
                        first_error = Some(
                            Q5Error::execution_with_code(
                                ErrorCode::EXEC_SPAWN_FAILED,
                                "could not start worker thread",
                                Some(worker),
                            )
                            .with_source(e),
                        );
                        break;
                    }
                }
            }

            // Every handle is joined so a panicking worker never escapes the scope.
            for (worker, handle) in handles {
                let outcome = match handle.join() {
                    Ok(Ok(stats)) => {
                        trace!(
                            "Worker {} done: {} scanned, {} matched",
                            worker,
                            stats.scanned,
                            stats.matched
                        );
                        Ok(())
                    }
                    Ok(Err(e)) => Err(e),
                    Err(_) => Err(Q5Error::execution_with_code(
                        ErrorCode::EXEC_WORKER_PANICKED,
                        "worker thread panicked",
                        Some(worker),
                    )),
                };
                if let Err(e) = outcome {
                    first_error.get_or_insert(e);
                }
            }

            first_error.map_or(Ok(()), Err)
        })?;

        let result = shared.into_result(worker_count)?;
        info!(
            "Scan finished in {:?}: {} of {} line items matched across {} nations",
            started.elapsed(),
            result.stats.matched,
            result.stats.scanned,
            result.revenue.len()
        );
        Ok(result)
    }
}
