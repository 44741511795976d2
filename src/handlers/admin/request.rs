//! Admin request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_SEARCH_TERM_LENGTH, ORDER_VAR, PAGE_VAR, SEARCH_VAR};

/// Changelist query parameters
///
/// Read from the raw pair list since the changelist also has to see
/// `sort_by` and keep unknown parameters when redirecting.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ChangelistQuery {
    /// Page number, parsed leniently
    pub p: Option<String>,

    /// Dot-separated ordering indexes
    pub o: Option<String>,

    #[validate(length(max = MAX_SEARCH_TERM_LENGTH))]
    pub q: Option<String>,
}

impl ChangelistQuery {
    /// Last value of each known parameter wins
    pub fn from_params(params: &[(String, String)]) -> Self {
        let mut query = Self::default();
        for (key, value) in params {
            match key.as_str() {
                PAGE_VAR => query.p = Some(value.clone()),
                ORDER_VAR => query.o = Some(value.clone()),
                SEARCH_VAR => {
                    let term = value.trim();
                    query.q = (!term.is_empty()).then(|| term.to_string());
                }
                _ => {}
            }
        }
        query
    }
}
