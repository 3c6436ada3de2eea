//! JSON bodies returned by the HTTP endpoints.
use serde::{Deserialize, Serialize};

pub const CITY: &str = "Bengaluru";
pub const AUTHORITY: &str = "BMTC";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteShape {
    /// `[lat, lon]` pairs in travel order
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyBuses {
    pub city: String,
    pub authority: String,
    /// Route short names, sorted and unique
    pub buses: Vec<String>,
}

impl NearbyBuses {
    pub fn new(buses: Vec<String>) -> Self {
        NearbyBuses {
            city: CITY.to_string(),
            authority: AUTHORITY.to_string(),
            buses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveDelay {
    /// Minutes, 0 to 15. Not a real measurement.
    pub delay: u8,
    /// HH:MM:SS
    pub updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
