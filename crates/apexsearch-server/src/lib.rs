//! apexsearch server — startup, shared state, and HTTP routes.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::{initialize, startup, AppState};
