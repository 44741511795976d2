//! Ranking handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Ranking routes, dispatched through the ranking URL table
pub fn routes() -> Router<AppState> {
    Router::new().route("/{*path}", get(handler::dispatch))
}
