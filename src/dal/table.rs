//! Reading a GTFS text table row by row
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::{io::Read, path::PathBuf};
use tracing::warn;

pub const ROUTES_FILE: &str = "routes.txt";
pub const STOPS_FILE: &str = "stops.txt";
pub const TRIPS_FILE: &str = "trips.txt";
pub const SHAPES_FILE: &str = "shapes.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";

/// The rows of a table that deserialized, and how many didn't.
#[derive(Debug)]
pub struct Table<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// Deserializes every row of a table.
/// A row with more fields than the header, or a value that doesn't parse, is logged and skipped.
/// A row with fewer fields is padded with empty ones, so missing optional columns read as `None`
/// and missing required ones fail like any other empty value.
/// Only an unreadable header or an I/O error fails the whole table.
pub fn read_table<R, T>(reader: R, table: &'static str) -> Result<Table<T>, FeedError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| FeedError::Header { table, source })?
        .clone();

    let mut rows = vec![];
    let mut skipped = 0;

    for record in reader.records() {
        let mut record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(FeedError::Read { table, source: e }),
            Err(e) => {
                warn!(table, "skipping unreadable row: {e}");
                skipped += 1;
                continue;
            }
        };

        if record.len() > headers.len() {
            warn!(
                table,
                line = record.position().map(|p| p.line()),
                "skipping row with {} fields, the header has {}",
                record.len(),
                headers.len()
            );
            skipped += 1;
            continue;
        }

        while record.len() < headers.len() {
            record.push_field("");
        }

        match record.deserialize::<T>(Some(&headers)) {
            Ok(row) => rows.push(row),
            Err(e) => {
                warn!(table, "skipping malformed row: {e}");
                skipped += 1;
            }
        }
    }

    Ok(Table { rows, skipped })
}

#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("couldn't open {}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("couldn't read the header of {table}")]
    Header {
        table: &'static str,
        source: csv::Error,
    },

    #[error("error reading {table}")]
    Read {
        table: &'static str,
        source: csv::Error,
    },
}
