//! Web layer for the garden server.
//!
//! Provides HTTP endpoints for location, weather and the watering decision.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
