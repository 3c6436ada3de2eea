use super::{
    gtfs_model::{RouteRecord, ShapeRecord, StopRecord, StopTimeRecord, TripRecord},
    ids::{RouteId, ShapeId, StopId, TripId},
};

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub route_id: RouteId,
    /// The public route number, e.g. "500K"
    pub short_name: Option<String>,
}

impl From<RouteRecord> for Route {
    fn from(value: RouteRecord) -> Self {
        Route {
            route_id: value.route_id,
            short_name: value.route_short_name,
        }
    }
}

/// A stop with finite coordinates. Rows that don't have them never become a `Stop`.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub stop_id: StopId,
    pub lat: f64,
    pub lon: f64,
}

impl TryFrom<StopRecord> for Stop {
    type Error = InvalidStop;

    fn try_from(value: StopRecord) -> Result<Self, Self::Error> {
        match (value.stop_lat, value.stop_lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Ok(Stop {
                stop_id: value.stop_id,
                lat,
                lon,
            }),
            _ => Err(InvalidStop {
                stop_id: value.stop_id,
            }),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("stop {stop_id} has no usable coordinates")]
pub struct InvalidStop {
    pub stop_id: StopId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub trip_id: TripId,
    pub route_id: RouteId,
    pub shape_id: Option<ShapeId>,
}

impl From<TripRecord> for Trip {
    fn from(value: TripRecord) -> Self {
        Trip {
            trip_id: value.trip_id,
            route_id: value.route_id,
            shape_id: value.shape_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapePoint {
    pub shape_id: ShapeId,
    /// Position of the point along the shape. Not necessarily contiguous.
    pub sequence: u32,
    pub lat: f64,
    pub lon: f64,
}

impl From<ShapeRecord> for ShapePoint {
    fn from(value: ShapeRecord) -> Self {
        ShapePoint {
            shape_id: value.shape_id,
            sequence: value.shape_pt_sequence,
            lat: value.shape_pt_lat,
            lon: value.shape_pt_lon,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StopTime {
    pub trip_id: TripId,
    pub stop_id: StopId,
}

impl From<StopTimeRecord> for StopTime {
    fn from(value: StopTimeRecord) -> Self {
        StopTime {
            trip_id: value.trip_id,
            stop_id: value.stop_id,
        }
    }
}
