use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a GTFS identifier as a string newtype, so ids from different tables can't be mixed up.
macro_rules! gtfs_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[cfg(test)]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

gtfs_id!(
    /// `route_id` of routes.txt
    RouteId
);
gtfs_id!(
    /// `stop_id` of stops.txt
    StopId
);
gtfs_id!(
    /// `trip_id` of trips.txt
    TripId
);
gtfs_id!(
    /// `shape_id` of shapes.txt
    ShapeId
);
