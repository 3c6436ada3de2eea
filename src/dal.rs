pub mod routes;
pub mod shapes;
pub mod stop_times;
pub mod stops;
pub mod table;
pub mod trips;

pub use routes::*;
pub use shapes::*;
pub use stop_times::*;
pub use stops::*;
pub use table::*;
pub use trips::*;
