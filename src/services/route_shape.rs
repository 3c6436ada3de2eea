//! Polyline of a route, looked up by its public route number
use tracing::debug;

use crate::{feed::GtfsFeed, model::api_model::RouteShape};

/// The shape of the first trip of the first route named `short_name`, ordered by sequence.
///
/// Routes usually have several shapes (one per direction or variant). Only the first trip's is used.
/// Every miss along the way (unknown route, no trips, a trip without a shape) gives an empty shape.
#[tracing::instrument(skip(feed))]
pub fn route_shape(feed: &GtfsFeed, short_name: &str) -> RouteShape {
    let Some(route) = feed.first_route_named(short_name) else {
        debug!("no route named {short_name}");
        return RouteShape { points: vec![] };
    };

    let Some(trip) = feed.trips_of_route(&route.route_id).next() else {
        debug!("route {} has no trips", route.route_id);
        return RouteShape { points: vec![] };
    };

    let Some(shape_id) = &trip.shape_id else {
        debug!("trip {} has no shape", trip.trip_id);
        return RouteShape { points: vec![] };
    };

    let points = feed
        .shape_points(shape_id)
        .map(|p| [p.lat, p.lon])
        .collect();

    RouteShape { points }
}
