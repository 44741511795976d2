//! Admin listing handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_listings))
        .route("/{listing}/", get(handler::changelist))
        .route("/{listing}/form", get(handler::add_form))
        .route("/{listing}/{id}/", get(handler::change_form))
}
