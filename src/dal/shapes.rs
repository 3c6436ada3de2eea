use itertools::Itertools;
use std::io::Read;
use tracing::info;

use super::{FeedError, SHAPES_FILE, read_table};
use crate::model::{feed_model::ShapePoint, gtfs_model::ShapeRecord};

/// Loads the shape points in file order. Sorting by sequence is left to the feed index.
#[tracing::instrument(err, skip(reader))]
pub fn load_shapes<R: Read>(reader: R) -> Result<Vec<ShapePoint>, FeedError> {
    let table = read_table::<_, ShapeRecord>(reader, SHAPES_FILE)?;

    info!(
        "loaded {} shape points, skipped {}",
        table.rows.len(),
        table.skipped
    );

    Ok(table.rows.into_iter().map(ShapePoint::from).collect_vec())
}
