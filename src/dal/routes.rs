use itertools::Itertools;
use std::io::Read;
use tracing::info;

use super::{FeedError, ROUTES_FILE, read_table};
use crate::model::{feed_model::Route, gtfs_model::RouteRecord};

#[tracing::instrument(err, skip(reader))]
pub fn load_routes<R: Read>(reader: R) -> Result<Vec<Route>, FeedError> {
    let table = read_table::<_, RouteRecord>(reader, ROUTES_FILE)?;

    info!("loaded {} routes, skipped {}", table.rows.len(), table.skipped);

    Ok(table.rows.into_iter().map(Route::from).collect_vec())
}
