//! R-tree over stop coordinates.
//!
//! The tree only narrows the candidates to a circle around the query point. Callers apply their exact
//! distance test on what comes back.
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::model::feed_model::Stop;

/// A stop's position in the tree, pointing back at its row in the stops table.
#[derive(Clone, Debug)]
pub struct StopNode {
    pub stop_index: usize,
    /// `[lat, lon]`
    point: [f64; 2],
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

pub struct StopTree {
    tree: RTree<StopNode>,
}

impl StopTree {
    pub fn new(stops: &[Stop]) -> Self {
        let nodes = stops
            .iter()
            .enumerate()
            .map(|(stop_index, stop)| StopNode {
                stop_index,
                point: [stop.lat, stop.lon],
            })
            .collect();

        StopTree {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Indexes of the stops at most `radius` degrees (Euclidean) away from `(lat, lon)`.
    pub fn within(&self, lat: f64, lon: f64, radius: f64) -> impl Iterator<Item = usize> + '_ {
        self.tree
            .locate_within_distance([lat, lon], radius * radius)
            .map(|node| node.stop_index)
    }
}
