//! Pipe-delimited `.tbl` reader
//!
//! One file per relation, `|`-separated fields, no header row and no quoting.
//! Rows that are too short or whose used fields do not parse are dropped and
//! counted; failing to open or read the file aborts the load.

use super::records::TableRecord;
use crate::error::{common, ErrorCode, Q5Error, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

/// Records of one relation plus the number of rows that were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Read `T::FILE_NAME` from `dir`
pub fn load_table<T: TableRecord>(dir: &Path) -> Result<LoadedTable<T>> {
    let path = dir.join(T::FILE_NAME);
    trace!("Opening {} table at {}", T::TABLE, path.display());

    let file = File::open(&path).map_err(|e| common::table_io_error(&path, e))?;
    let loaded = read_rows::<T, _>(file).map_err(|e| csv_load_error(&path, e))?;

    debug!(
        "Loaded {} {} rows ({} skipped)",
        loaded.records.len(),
        T::TABLE,
        loaded.skipped
    );
    Ok(loaded)
}

/// Parse every row from `reader`, keeping only well-formed records.
///
/// Only I/O failures are returned as errors; everything else is a row-level
/// problem and the row is skipped.
pub fn read_rows<T: TableRecord, R: Read>(
    reader: R,
) -> std::result::Result<LoadedTable<T>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        match result {
            Ok(row) => match T::from_row(&row) {
                Some(record) => records.push(record),
                None => skipped += 1,
            },
            Err(err) if err.is_io_error() => return Err(err),
            Err(_) => skipped += 1,
        }
    }

    Ok(LoadedTable { records, skipped })
}

fn csv_load_error(path: &Path, err: csv::Error) -> Q5Error {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => common::table_io_error(path, io),
        kind => Q5Error::load_with_code(
            ErrorCode::LOAD_IO_ERROR,
            format!("unreadable table: {:?}", kind),
            Some(path.to_path_buf()),
        ),
    }
}
