//! Rows of the GTFS text tables, as they come out of the CSV reader.
//! Columns that aren't listed are ignored.
use serde::{Deserialize, Deserializer};

use super::ids::{RouteId, ShapeId, StopId, TripId};

#[derive(Debug, Deserialize)]
pub struct RouteRecord {
    pub route_id: RouteId,
    /// Empty in some feeds
    pub route_short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StopRecord {
    pub stop_id: StopId,
    /// `None` when the column isn't a number
    #[serde(default, deserialize_with = "coerce_coordinate")]
    pub stop_lat: Option<f64>,
    /// `None` when the column isn't a number
    #[serde(default, deserialize_with = "coerce_coordinate")]
    pub stop_lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TripRecord {
    pub trip_id: TripId,
    pub route_id: RouteId,
    /// Optional in GTFS
    #[serde(default)]
    pub shape_id: Option<ShapeId>,
}

#[derive(Debug, Deserialize)]
pub struct ShapeRecord {
    pub shape_id: ShapeId,
    pub shape_pt_lat: f64,
    pub shape_pt_lon: f64,
    pub shape_pt_sequence: u32,
}

#[derive(Debug, Deserialize)]
pub struct StopTimeRecord {
    pub trip_id: TripId,
    pub stop_id: StopId,
}

// Stop coordinates are hand-edited in a lot of feeds, so a bad value only invalidates its own row.
fn coerce_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;

    Ok(s.and_then(|s| s.trim().parse::<f64>().ok()))
}
