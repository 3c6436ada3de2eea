pub mod api_model;
pub mod feed_model;
pub mod gtfs_model;
pub mod ids;
