//! Ranking response DTOs

use serde::Serialize;
use serde_json::Value;

use crate::{
    models::{Contest, ContestStatus, Statistic},
    pagination::PageInfo,
};

/// Contest list page; each row carries its standings link as `url`
#[derive(Debug, Serialize)]
pub struct ContestsListResponse {
    pub contests: Vec<Value>,
    pub page: PageInfo,
}

/// Standings of one or more contests
#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub contests: Vec<ContestHeader>,
    pub rows: Vec<Value>,
    pub page: PageInfo,
}

/// Score history of standings rows
#[derive(Debug, Serialize)]
pub struct ScoreHistoryResponse {
    pub statistics: Vec<Statistic>,
}

/// Contest shown above its standings
#[derive(Debug, Serialize)]
pub struct ContestHeader {
    #[serde(flatten)]
    pub contest: Contest,
    pub status: ContestStatus,
    pub url: String,
}

impl From<Contest> for ContestHeader {
    fn from(contest: Contest) -> Self {
        Self {
            status: contest.status(),
            url: contest.standings_route().reverse(),
            contest,
        }
    }
}
