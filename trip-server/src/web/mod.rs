//! Web layer for the trip planner.
//!
//! Provides JSON endpoints for planning routes with optimal fuel stops
//! and for managing previously planned routes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
