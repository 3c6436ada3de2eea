use std::io::Read;
use tracing::{info, warn};

use super::{FeedError, STOPS_FILE, read_table};
use crate::model::{feed_model::Stop, gtfs_model::StopRecord};

/// Loads the stops, dropping every stop whose latitude or longitude isn't a finite number.
#[tracing::instrument(err, skip(reader))]
pub fn load_stops<R: Read>(reader: R) -> Result<Vec<Stop>, FeedError> {
    let table = read_table::<_, StopRecord>(reader, STOPS_FILE)?;

    let mut dropped = 0;
    let stops: Vec<Stop> = table
        .rows
        .into_iter()
        .filter_map(|r| match Stop::try_from(r) {
            Err(e) => {
                warn!("dropping {e}");
                dropped += 1;
                None
            }
            Ok(s) => Some(s),
        })
        .collect();

    info!(
        "loaded {} stops, skipped {}, dropped {} without coordinates",
        stops.len(),
        table.skipped,
        dropped
    );

    Ok(stops)
}
