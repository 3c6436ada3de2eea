use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};

use super::{ApiError, AppState};
use crate::{
    model::api_model::{LiveDelay, NearbyBuses, RouteShape},
    services::{self, nearby_buses::QueryPoint},
};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// The raw query string pairs. A repeated key counts with its first value.
#[derive(Debug)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn extract(query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Result<Self, ApiError> {
        let Query(pairs) = query?;
        Ok(QueryParams(pairs))
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /bmtc/route?route=<short name>`
pub async fn route_shape(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<RouteShape>, ApiError> {
    let params = QueryParams::extract(query)?;

    // No route name can't match any route
    let shape = match params.first("route") {
        Some(route) => services::route_shape::route_shape(&state.feed, route),
        None => RouteShape { points: vec![] },
    };

    Ok(Json(shape))
}

/// `GET /bmtc/buses?lat=<lat>&lng=<lng>`
pub async fn nearby_buses(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<NearbyBuses>, ApiError> {
    let params = QueryParams::extract(query)?;
    let point = QueryPoint::parse(params.first("lat"), params.first("lng"))?;

    Ok(Json(services::nearby_buses::nearby_buses(&state.feed, point)))
}

/// `GET /live_delay`
pub async fn live_delay(State(state): State<AppState>) -> Json<LiveDelay> {
    Json(services::live_delay::live_delay(state.timezone))
}
