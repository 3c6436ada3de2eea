//! Bus numbers serving the stops around a point
use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::{
    feed::GtfsFeed,
    model::{api_model::NearbyBuses, ids::TripId},
};

/// Stops closer than this, in L1 degrees, count as nearby. Roughly a kilometre around Bengaluru.
pub const NEARBY_THRESHOLD_DEGREES: f64 = 0.02;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QueryPoint {
    pub lat: f64,
    pub lng: f64,
}

impl QueryPoint {
    /// Parses the raw `lat` and `lng` query parameters
    pub fn parse(lat: Option<&str>, lng: Option<&str>) -> Result<Self, InvalidInput> {
        Ok(QueryPoint {
            lat: parse_coordinate("lat", lat)?,
            lng: parse_coordinate("lng", lng)?,
        })
    }
}

fn parse_coordinate(name: &'static str, value: Option<&str>) -> Result<f64, InvalidInput> {
    let value = value.ok_or(InvalidInput::Missing(name))?;

    value
        .trim()
        .parse()
        .map_err(|_| InvalidInput::NotANumber {
            name,
            value: value.to_string(),
        })
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum InvalidInput {
    #[error("missing query parameter `{0}`")]
    Missing(&'static str),

    #[error("query parameter `{name}` isn't a number: {value:?}")]
    NotANumber { name: &'static str, value: String },
}

/// Route short names of every trip stopping near `point`, sorted and without duplicates.
#[tracing::instrument(skip(feed))]
pub fn nearby_buses(feed: &GtfsFeed, point: QueryPoint) -> NearbyBuses {
    let stops = feed.stops_near(point.lat, point.lng, NEARBY_THRESHOLD_DEGREES);
    if stops.is_empty() {
        debug!("no stops nearby");
        return NearbyBuses::new(vec![]);
    }

    let trip_ids: HashSet<&TripId> = stops
        .iter()
        .flat_map(|stop| feed.trips_at_stop(&stop.stop_id))
        .collect();

    let route_ids: HashSet<_> = trip_ids
        .iter()
        .flat_map(|&trip_id| feed.trips_with_id(trip_id))
        .map(|trip| &trip.route_id)
        .collect();

    let bus_numbers: BTreeSet<&str> = route_ids
        .iter()
        .flat_map(|&route_id| feed.routes_with_id(route_id))
        .filter_map(|route| route.short_name.as_deref())
        .collect();

    debug!(
        stops = stops.len(),
        trips = trip_ids.len(),
        routes = route_ids.len(),
        "found {} buses",
        bus_numbers.len()
    );

    NearbyBuses::new(bus_numbers.into_iter().map(str::to_string).collect())
}
