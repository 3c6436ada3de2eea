//! HTTP facade over the feed
mod error;
mod handlers;

use std::sync::Arc;

use axum::{Router, routing::get};
use chrono_tz::Tz;
use tower_http::trace::TraceLayer;

use crate::feed::GtfsFeed;
pub use error::ApiError;

/// Shared by every request. The feed is never written after startup so it needs no lock.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<GtfsFeed>,
    pub timezone: Option<Tz>,
}

impl AppState {
    pub fn new(feed: GtfsFeed, timezone: Option<Tz>) -> Self {
        AppState {
            feed: Arc::new(feed),
            timezone,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/bmtc/route", get(handlers::route_shape))
        .route("/live_delay", get(handlers::live_delay))
        .route("/bmtc/buses", get(handlers::nearby_buses))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::feed::test_feed::{feed, sample_feed};

    async fn get(app: Router, uri: &str) -> Result<(StatusCode, Value), anyhow::Error> {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await?;

        Ok((status, serde_json::from_slice(&body)?))
    }

    fn app() -> Router {
        router(AppState::new(sample_feed(), None))
    }

    #[tokio::test]
    async fn route_points_are_ordered() -> Result<(), anyhow::Error> {
        let app = router(AppState::new(
            feed(
                "route_id,route_short_name\nR1,500K\n",
                "stop_id,stop_lat,stop_lon\n",
                "route_id,trip_id,shape_id\nR1,T1,S1\n",
                "shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\nS1,12.9,77.6,2\nS1,12.8,77.5,1\n",
                "trip_id,stop_id\n",
            ),
            None,
        ));

        let (status, body) = get(app, "/bmtc/route?route=500K").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"points": [[12.8, 77.5], [12.9, 77.6]]}));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_or_missing_route_has_no_points() -> Result<(), anyhow::Error> {
        for uri in ["/bmtc/route?route=NOPE", "/bmtc/route"] {
            let (status, body) = get(app(), uri).await?;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"points": []}));
        }

        Ok(())
    }

    #[tokio::test]
    async fn route_name_is_url_decoded() -> Result<(), anyhow::Error> {
        let app = router(AppState::new(
            feed(
                "route_id,route_short_name\nR1,KIA-5 D\n",
                "stop_id,stop_lat,stop_lon\n",
                "route_id,trip_id,shape_id\nR1,T1,S1\n",
                "shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\nS1,13.19,77.70,1\n",
                "trip_id,stop_id\n",
            ),
            None,
        ));

        let (_, body) = get(app, "/bmtc/route?route=KIA-5%20D").await?;

        assert_eq!(body, json!({"points": [[13.19, 77.70]]}));

        Ok(())
    }

    #[tokio::test]
    async fn buses_near_a_stop() -> Result<(), anyhow::Error> {
        let (status, body) = get(app(), "/bmtc/buses?lat=12.9767&lng=77.5713").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"city": "Bengaluru", "authority": "BMTC", "buses": ["335E", "500K"]})
        );

        Ok(())
    }

    #[tokio::test]
    async fn no_buses_in_the_gulf_of_guinea() -> Result<(), anyhow::Error> {
        let (status, body) = get(app(), "/bmtc/buses?lat=0&lng=0").await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"city": "Bengaluru", "authority": "BMTC", "buses": []})
        );

        Ok(())
    }

    #[tokio::test]
    async fn bad_coordinates_are_client_errors() -> Result<(), anyhow::Error> {
        for uri in [
            "/bmtc/buses",
            "/bmtc/buses?lat=12.9767",
            "/bmtc/buses?lng=77.5713",
            "/bmtc/buses?lat=12.9767&lng=abc",
            "/bmtc/buses?lat=&lng=77.5713",
        ] {
            let (status, body) = get(app(), uri).await?;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string(), "{uri}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn repeated_parameters_use_the_first_value() -> Result<(), anyhow::Error> {
        let (status, body) = get(app(), "/bmtc/buses?lat=12.9767&lat=1&lng=77.5713").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["buses"], json!(["335E", "500K"]));

        let (status, body) = get(app(), "/bmtc/buses?lat=0&lat=12.9767&lng=0&lng=77.5713").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["buses"], json!([]));

        let (_, single) = get(app(), "/bmtc/route?route=500K").await?;
        let (status, repeated) = get(app(), "/bmtc/route?route=500K&route=335E").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(repeated, single);
        assert_ne!(repeated, json!({"points": []}));

        Ok(())
    }

    #[tokio::test]
    async fn live_delay_shape() -> Result<(), anyhow::Error> {
        let app = router(AppState::new(sample_feed(), Some(chrono_tz::Asia::Kolkata)));

        let (status, body) = get(app, "/live_delay").await?;

        assert_eq!(status, StatusCode::OK);
        let delay = body["delay"].as_u64().unwrap();
        assert!(delay <= 15);
        let updated = body["updated"].as_str().unwrap();
        assert!(chrono::NaiveTime::parse_from_str(updated, "%H:%M:%S").is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn index_page_is_html() -> Result<(), anyhow::Error> {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()?;
        assert!(content_type.starts_with("text/html"));

        Ok(())
    }
}
