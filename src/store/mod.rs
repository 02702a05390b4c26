//! In-memory record store for the six Query 5 relations
//!
//! The store is built once per run, either sequentially with
//! [`RecordStore::load`] or with the six tables read concurrently on the
//! tokio blocking pool via [`RecordStore::load_concurrent`].

pub mod loader;
pub mod records;

pub use loader::{load_table, read_rows, LoadedTable};
pub use records::{
    Customer, CustomerKey, LineItem, Nation, NationKey, Order, OrderKey, Region, RegionKey,
    Supplier, SupplierKey, TableRecord,
};

use crate::error::{ErrorCode, Q5Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Row counts for one relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: &'static str,
    pub loaded: usize,
    pub skipped: usize,
}

/// Row counts for every relation, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub tables: Vec<TableReport>,
}

impl LoadReport {
    fn record<T: TableRecord>(&mut self, table: &LoadedTable<T>) {
        self.tables.push(TableReport {
            table: T::TABLE,
            loaded: table.records.len(),
            skipped: table.skipped,
        });
    }

    pub fn total_loaded(&self) -> usize {
        self.tables.iter().map(|t| t.loaded).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.tables.iter().map(|t| t.skipped).sum()
    }
}

/// Parsed rows for each relation. `line_items` order fixes partition boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    pub regions: Vec<Region>,
    pub nations: Vec<Nation>,
    pub suppliers: Vec<Supplier>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub line_items: Vec<LineItem>,
    pub report: LoadReport,
}

impl RecordStore {
    /// Load all six tables from `dir`, one after the other
    pub fn load(dir: &Path) -> Result<Self> {
        let regions = load_table::<Region>(dir)?;
        let nations = load_table::<Nation>(dir)?;
        let suppliers = load_table::<Supplier>(dir)?;
        let customers = load_table::<Customer>(dir)?;
        let orders = load_table::<Order>(dir)?;
        let line_items = load_table::<LineItem>(dir)?;

        Ok(Self::assemble(
            regions, nations, suppliers, customers, orders, line_items,
        ))
    }

    /// Load all six tables from `dir` concurrently.
    ///
    /// The first failing table aborts the whole load.
    pub async fn load_concurrent(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let (regions, nations, suppliers, customers, orders, line_items) = tokio::try_join!(
            load_blocking::<Region>(dir.clone()),
            load_blocking::<Nation>(dir.clone()),
            load_blocking::<Supplier>(dir.clone()),
            load_blocking::<Customer>(dir.clone()),
            load_blocking::<Order>(dir.clone()),
            load_blocking::<LineItem>(dir),
        )?;

        Ok(Self::assemble(
            regions, nations, suppliers, customers, orders, line_items,
        ))
    }

    fn assemble(
        regions: LoadedTable<Region>,
        nations: LoadedTable<Nation>,
        suppliers: LoadedTable<Supplier>,
        customers: LoadedTable<Customer>,
        orders: LoadedTable<Order>,
        line_items: LoadedTable<LineItem>,
    ) -> Self {
        let mut report = LoadReport::default();
        report.record(&regions);
        report.record(&nations);
        report.record(&suppliers);
        report.record(&customers);
        report.record(&orders);
        report.record(&line_items);

        debug!(
            "Record store ready: {} rows loaded, {} malformed rows skipped",
            report.total_loaded(),
            report.total_skipped()
        );

        Self {
            regions: regions.records,
            nations: nations.records,
            suppliers: suppliers.records,
            customers: customers.records,
            orders: orders.records,
            line_items: line_items.records,
            report,
        }
    }
}

async fn load_blocking<T: TableRecord>(dir: PathBuf) -> Result<LoadedTable<T>> {
    tokio::task::spawn_blocking(move || load_table::<T>(&dir))
        .await
        .map_err(|e| {
            Q5Error::execution_with_code(
                ErrorCode::EXEC_TASK_JOIN_FAILED,
                format!("loading the {} table did not complete", T::TABLE),
                None,
            )
            .with_source(e)
        })?
}
