//! Ranking request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_SEARCH_TERM_LENGTH;

/// Ranking query parameters
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RankingQuery {
    /// Page number, parsed leniently
    pub p: Option<String>,

    #[validate(length(max = MAX_SEARCH_TERM_LENGTH))]
    pub q: Option<String>,
}
