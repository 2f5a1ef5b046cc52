//! Web layer for the drayage dispatch engine.
//!
//! Provides HTTP endpoints for deriving journeys, ranking street turns,
//! and validating container numbers.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
