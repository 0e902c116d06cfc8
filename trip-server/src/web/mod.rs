//! Web layer for the trip quote engine.
//!
//! JSON endpoints for browsing the catalog, quoting itineraries, and
//! sharing them by link.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
