//! HTTP front end for the campaign rule engine.

pub mod api;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
