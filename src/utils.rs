/// L1 distance between two coordinates, in raw degrees.
/// Only a rough stand-in for ground distance, and a worse one the further from the equator.
pub fn manhattan_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    (lat1 - lat2).abs() + (lon1 - lon2).abs()
}
