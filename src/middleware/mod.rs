//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{staff_middleware, StaffUser};
pub use logging::logging_middleware;
