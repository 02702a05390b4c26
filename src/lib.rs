//! # tpch-q5
//!
//! Parallel join-and-aggregate engine for TPC-H Query 5: revenue per nation
//! for orders in a date window, counting only line items whose customer and
//! supplier share a nation inside the target region.
//!
//! ## Usage
//!
//! ```bash
//! tpch-q5 --r_name ASIA --start_date 1994-01-01 --end_date 1995-01-01 \
//!     --threads 4 --table_path ./tables --result_path ./out
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup, fatal error handling and the end-to-end run
//! - `cli` - Command-line flags and configuration layering
//! - `config` - Configuration layers and validation
//! - `error` - Coded error type shared by every module
//! - `output` - Result file and console output
//! - `query` - Join indices, partitioning, workers, merge and pipeline
//! - `store` - Typed records and the `.tbl` loader
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod query;
pub mod store;

pub use error::{Q5Error, Result};
pub use query::{Pipeline, QueryParams, QueryResult};
pub use store::RecordStore;
