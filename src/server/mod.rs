pub mod feedback;
pub mod router;
pub mod routes;
pub mod views;

pub use router::{AppState, app_router};
