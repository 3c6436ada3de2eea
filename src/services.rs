pub mod live_delay;
pub mod nearby_buses;
pub mod route_shape;
