use itertools::Itertools;
use std::io::Read;
use tracing::info;

use super::{FeedError, TRIPS_FILE, read_table};
use crate::model::{feed_model::Trip, gtfs_model::TripRecord};

#[tracing::instrument(err, skip(reader))]
pub fn load_trips<R: Read>(reader: R) -> Result<Vec<Trip>, FeedError> {
    let table = read_table::<_, TripRecord>(reader, TRIPS_FILE)?;

    info!("loaded {} trips, skipped {}", table.rows.len(), table.skipped);

    Ok(table.rows.into_iter().map(Trip::from).collect_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_id_is_optional() -> Result<(), anyhow::Error> {
        let csv = "route_id,service_id,trip_id,shape_id
R1,WK,T1,S1
R1,WK,T2,
";

        let trips = load_trips(csv.as_bytes())?;

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].shape_id.as_ref().map(|s| s.as_str()), Some("S1"));
        assert_eq!(trips[1].shape_id, None);

        Ok(())
    }

    #[test]
    fn missing_shape_column() -> Result<(), anyhow::Error> {
        let csv = "route_id,service_id,trip_id\nR1,WK,T1\n";

        let trips = load_trips(csv.as_bytes())?;

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].shape_id, None);

        Ok(())
    }
}
