//! Utility functions

pub mod crypto;
pub mod validation;

pub use crypto::hash_string;
pub use validation::{validate_identifier, validate_slug};
