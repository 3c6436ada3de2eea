//! The GTFS feed held in memory for the lifetime of the process.
//!
//! Tables are kept in file order. Lookups go through indexes built once in [`GtfsFeed::from_tables`],
//! so a request never scans a whole table.
mod spatial;

use std::{
    collections::HashMap,
    hash::Hash,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use tracing::info;

use crate::{
    dal::{
        FeedError, ROUTES_FILE, SHAPES_FILE, STOP_TIMES_FILE, STOPS_FILE, TRIPS_FILE, load_routes,
        load_shapes, load_stop_times, load_stops, load_trips,
    },
    model::{
        feed_model::{Route, ShapePoint, Stop, StopTime, Trip},
        ids::{RouteId, ShapeId, StopId, TripId},
    },
    utils::manhattan_distance,
};
use spatial::StopTree;

/// The five tables of a feed, rows in file order.
#[derive(Debug, Default, Clone)]
pub struct FeedTables {
    pub routes: Vec<Route>,
    pub stops: Vec<Stop>,
    pub trips: Vec<Trip>,
    pub shape_points: Vec<ShapePoint>,
    pub stop_times: Vec<StopTime>,
}

pub struct GtfsFeed {
    tables: FeedTables,
    /// First route (file order) per short name
    route_by_short_name: HashMap<String, usize>,
    routes_by_id: HashMap<RouteId, Vec<usize>>,
    /// In file order
    trips_by_route: HashMap<RouteId, Vec<usize>>,
    trips_by_id: HashMap<TripId, Vec<usize>>,
    /// Sorted by sequence
    points_by_shape: HashMap<ShapeId, Vec<usize>>,
    /// Distinct trips visiting each stop
    trips_by_stop: HashMap<StopId, Vec<TripId>>,
    stop_tree: StopTree,
}

impl GtfsFeed {
    /// Loads `routes.txt`, `stops.txt`, `trips.txt`, `shapes.txt` and `stop_times.txt` from `dir`.
    /// Every file has to exist. Bad rows inside them are skipped.
    #[tracing::instrument(err)]
    pub fn load_from_dir(dir: &Path) -> Result<Self, FeedError> {
        let open = |name: &str| {
            let path = dir.join(name);
            File::open(&path)
                .map(BufReader::new)
                .map_err(|source| FeedError::Open { path, source })
        };

        // Open all of them up front so a missing file fails before the slow parsing starts
        let routes = open(ROUTES_FILE)?;
        let stops = open(STOPS_FILE)?;
        let trips = open(TRIPS_FILE)?;
        let shapes = open(SHAPES_FILE)?;
        let stop_times = open(STOP_TIMES_FILE)?;

        Self::from_readers(routes, stops, trips, shapes, stop_times)
    }

    pub fn from_readers(
        routes: impl Read,
        stops: impl Read,
        trips: impl Read,
        shapes: impl Read,
        stop_times: impl Read,
    ) -> Result<Self, FeedError> {
        let tables = FeedTables {
            routes: load_routes(routes)?,
            stops: load_stops(stops)?,
            trips: load_trips(trips)?,
            shape_points: load_shapes(shapes)?,
            stop_times: load_stop_times(stop_times)?,
        };

        Ok(Self::from_tables(tables))
    }

    #[tracing::instrument(skip_all)]
    pub fn from_tables(tables: FeedTables) -> Self {
        let mut route_by_short_name = HashMap::new();
        let mut routes_by_id: HashMap<RouteId, Vec<usize>> = HashMap::new();
        for (i, route) in tables.routes.iter().enumerate() {
            if let Some(short_name) = &route.short_name {
                route_by_short_name.entry(short_name.clone()).or_insert(i);
            }
            routes_by_id
                .entry(route.route_id.clone())
                .or_default()
                .push(i);
        }

        let mut trips_by_route: HashMap<RouteId, Vec<usize>> = HashMap::new();
        let mut trips_by_id: HashMap<TripId, Vec<usize>> = HashMap::new();
        for (i, trip) in tables.trips.iter().enumerate() {
            trips_by_route
                .entry(trip.route_id.clone())
                .or_default()
                .push(i);
            trips_by_id.entry(trip.trip_id.clone()).or_default().push(i);
        }

        let mut points_by_shape: HashMap<ShapeId, Vec<usize>> = HashMap::new();
        for (i, point) in tables.shape_points.iter().enumerate() {
            points_by_shape
                .entry(point.shape_id.clone())
                .or_default()
                .push(i);
        }
        // Stable, so points sharing a sequence number keep their file order
        for points in points_by_shape.values_mut() {
            points.sort_by_key(|&i| tables.shape_points[i].sequence);
        }

        let mut trips_by_stop: HashMap<StopId, Vec<TripId>> = HashMap::new();
        for stop_time in &tables.stop_times {
            trips_by_stop
                .entry(stop_time.stop_id.clone())
                .or_default()
                .push(stop_time.trip_id.clone());
        }
        for trips in trips_by_stop.values_mut() {
            trips.sort();
            trips.dedup();
        }

        let stop_tree = StopTree::new(&tables.stops);

        info!(
            routes = tables.routes.len(),
            stops = tables.stops.len(),
            trips = tables.trips.len(),
            shapes = points_by_shape.len(),
            stop_times = tables.stop_times.len(),
            "indexed feed"
        );

        GtfsFeed {
            tables,
            route_by_short_name,
            routes_by_id,
            trips_by_route,
            trips_by_id,
            points_by_shape,
            trips_by_stop,
            stop_tree,
        }
    }

    pub fn tables(&self) -> &FeedTables {
        &self.tables
    }

    /// The first route in routes.txt with this short name
    pub fn first_route_named(&self, short_name: &str) -> Option<&Route> {
        self.route_by_short_name
            .get(short_name)
            .map(|&i| &self.tables.routes[i])
    }

    /// Every route row with this id. Normally exactly one.
    pub fn routes_with_id<'a>(&'a self, route_id: &RouteId) -> impl Iterator<Item = &'a Route> {
        rows(&self.routes_by_id, route_id, &self.tables.routes)
    }

    /// The route's trips, in trips.txt order
    pub fn trips_of_route<'a>(&'a self, route_id: &RouteId) -> impl Iterator<Item = &'a Trip> {
        rows(&self.trips_by_route, route_id, &self.tables.trips)
    }

    /// Every trip row with this id. Normally exactly one.
    pub fn trips_with_id<'a>(&'a self, trip_id: &TripId) -> impl Iterator<Item = &'a Trip> {
        rows(&self.trips_by_id, trip_id, &self.tables.trips)
    }

    /// The shape's points, ordered by `shape_pt_sequence`
    pub fn shape_points<'a>(&'a self, shape_id: &ShapeId) -> impl Iterator<Item = &'a ShapePoint> {
        rows(&self.points_by_shape, shape_id, &self.tables.shape_points)
    }

    /// The distinct trips with a stop time at this stop
    pub fn trips_at_stop(&self, stop_id: &StopId) -> &[TripId] {
        self.trips_by_stop
            .get(stop_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Stops whose L1 distance in degrees from `(lat, lon)` is strictly less than `max_distance`.
    /// Returned in stops.txt order.
    pub fn stops_near(&self, lat: f64, lon: f64, max_distance: f64) -> Vec<&Stop> {
        if !(lat.is_finite() && lon.is_finite()) {
            return vec![];
        }

        // An L1 ball fits inside the Euclidean ball of the same radius. The margin keeps rounding at
        // the edge of the circle from hiding a stop the exact test would accept.
        let mut indexes: Vec<usize> = self
            .stop_tree
            .within(lat, lon, max_distance * 1.5)
            .filter(|&i| {
                let stop = &self.tables.stops[i];
                manhattan_distance(stop.lat, stop.lon, lat, lon) < max_distance
            })
            .collect();
        indexes.sort_unstable();

        indexes.into_iter().map(|i| &self.tables.stops[i]).collect()
    }
}

/// The rows of `table` that `index` lists under `key`
fn rows<'a, K, T>(
    index: &'a HashMap<K, Vec<usize>>,
    key: &K,
    table: &'a [T],
) -> impl Iterator<Item = &'a T> + use<'a, K, T>
where
    K: Eq + Hash,
{
    index
        .get(key)
        .into_iter()
        .flatten()
        .map(move |&i| &table[i])
}
