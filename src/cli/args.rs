//! CLI argument structures
//!
//! Flag names use underscores (`--r_name`, `--start_date`, ...) to match the
//! established query tool invocation. Every query value is optional here so
//! it can also come from the environment or a config file.

use crate::config::ConfigLayer;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Compute TPC-H Query 5 revenue per nation over pipe-delimited tables
#[derive(Parser, Debug)]
#[command(name = "tpch-q5")]
#[command(about = "tpch-q5 - TPC-H Query 5 (local supplier volume) over .tbl files")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// TOML file with default values for any of the flags below
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Region name to restrict revenue to (case-sensitive, surrounding spaces ignored)
    #[arg(long = "r_name", value_name = "REGION")]
    pub r_name: Option<String>,

    /// First order date included (YYYY-MM-DD)
    #[arg(long = "start_date", value_name = "DATE")]
    pub start_date: Option<String>,

    /// First order date excluded (YYYY-MM-DD)
    #[arg(long = "end_date", value_name = "DATE")]
    pub end_date: Option<String>,

    /// Number of worker threads scanning lineitem (1 to 1024)
    #[arg(long = "threads", value_name = "N", allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Directory holding region.tbl, nation.tbl, ... lineitem.tbl
    #[arg(long = "table_path", value_name = "DIR")]
    pub table_path: Option<PathBuf>,

    /// Directory the result file is written to
    #[arg(long = "result_path", value_name = "DIR")]
    pub result_path: Option<PathBuf>,

    /// Result file format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl Cli {
    /// The command-line layer of the configuration
    pub fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            r_name: self.r_name.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            threads: self.threads,
            table_path: self.table_path.clone(),
            result_path: self.result_path.clone(),
            format: self.format,
            log_level: None,
        }
    }
}
