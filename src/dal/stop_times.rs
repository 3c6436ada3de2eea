use itertools::Itertools;
use std::io::Read;
use tracing::info;

use super::{FeedError, STOP_TIMES_FILE, read_table};
use crate::model::{feed_model::StopTime, gtfs_model::StopTimeRecord};

#[tracing::instrument(err, skip(reader))]
pub fn load_stop_times<R: Read>(reader: R) -> Result<Vec<StopTime>, FeedError> {
    let table = read_table::<_, StopTimeRecord>(reader, STOP_TIMES_FILE)?;

    info!(
        "loaded {} stop times, skipped {}",
        table.rows.len(),
        table.skipped
    );

    Ok(table.rows.into_iter().map(StopTime::from).collect_vec())
}
