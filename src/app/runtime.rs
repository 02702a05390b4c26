//! Query run
//!
//! Loads the tables, runs the fork-join pipeline on the blocking pool and
//! hands the result to the sink.

use crate::config::QueryConfig;
use crate::error::{ErrorExt, Result};
use crate::output::ResultSink;
use crate::query::{Pipeline, QueryResult};
use crate::store::RecordStore;
use std::time::Instant;
use tracing::{debug, info};

/// Run Query 5 end to end with a validated configuration
pub async fn run_query(config: QueryConfig) -> Result<QueryResult> {
    let started = Instant::now();
    info!(
        "Query 5 for region '{}' from {} to {} with {} workers",
        config.params.region_name, config.params.start_date, config.params.end_date, config.threads
    );

    let store = RecordStore::load_concurrent(config.table_path.clone()).await?;
    info!(
        "Loaded {} rows from {} in {:?}",
        store.report.total_loaded(),
        config.table_path.display(),
        started.elapsed()
    );
    for table in &store.report.tables {
        debug!(
            "  {}: {} rows, {} skipped",
            table.table, table.loaded, table.skipped
        );
    }

    let pipeline = Pipeline::new(config.params.clone(), config.threads);
    let result = tokio::task::spawn_blocking(move || pipeline.execute(&store))
        .await
        .to_execution_error("query pipeline did not complete")??;

    let stats = &result.stats;
    info!(
        "Rejected rows: {} missing order, {} outside dates, {} missing customer, \
         {} missing supplier, {} nation mismatch, {} outside region",
        stats.missing_order,
        stats.outside_date_range,
        stats.missing_customer,
        stats.missing_supplier,
        stats.nation_mismatch,
        stats.outside_region
    );

    ResultSink::new(&config.result_path, config.format)
        .write(&result)
        .await?;

    info!("Query 5 completed in {:?}", started.elapsed());
    Ok(result)
}
