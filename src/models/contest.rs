//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    admin::{FieldKind, ModelField, ModelSchema},
    routing::RankingRoute,
};

/// Contest database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub host: String,
    pub standings_url: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub n_statistics: i32,
    pub info: serde_json::Value,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Contest {
    pub const TABLE: &'static str = "contests";

    /// Get current status of the contest
    pub fn status(&self) -> ContestStatus {
        let now = Utc::now();
        if now < self.start_time {
            ContestStatus::Upcoming
        } else if now < self.end_time {
            ContestStatus::Running
        } else {
            ContestStatus::Past
        }
    }

    /// Canonical standings route, `standings/<slug>-<id>/`
    pub fn standings_route(&self) -> RankingRoute {
        RankingRoute::Standings {
            title_slug: self.slug.clone(),
            contest_id: self.id,
        }
    }

    pub fn schema() -> ModelSchema {
        ModelSchema {
            name: "contest".to_string(),
            table: Self::TABLE.to_string(),
            base_model: true,
            fields: vec![
                ModelField::new("id", FieldKind::AutoId),
                ModelField::new("title", FieldKind::Char),
                ModelField::new("slug", FieldKind::Char),
                ModelField::new("host", FieldKind::Char),
                ModelField::new("standings_url", FieldKind::Text),
                ModelField::new("start_time", FieldKind::DateTime),
                ModelField::new("end_time", FieldKind::DateTime),
                ModelField::new("n_statistics", FieldKind::Integer),
                ModelField::new("info", FieldKind::Json),
                ModelField::new("statistics", FieldKind::Reverse("statistic".to_string())),
                ModelField::new("created", FieldKind::DateTime),
                ModelField::new("modified", FieldKind::DateTime),
            ],
        }
    }
}

/// Contest status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Running,
    Past,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn contest(start_offset_hours: i64) -> Contest {
        let start = Utc::now() + Duration::hours(start_offset_hours);
        Contest {
            id: 42,
            title: "Codeforces Round 900".to_string(),
            slug: "codeforces-round-900".to_string(),
            host: "codeforces.com".to_string(),
            standings_url: None,
            start_time: start,
            end_time: start + Duration::hours(2),
            n_statistics: 0,
            info: serde_json::json!({}),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }

    #[test]
    fn test_status() {
        assert_eq!(contest(1).status(), ContestStatus::Upcoming);
        assert_eq!(contest(-1).status(), ContestStatus::Running);
        assert_eq!(contest(-3).status(), ContestStatus::Past);
    }

    #[test]
    fn test_standings_route() {
        assert_eq!(
            contest(0).standings_route().reverse(),
            "/ranking/standings/codeforces-round-900-42/"
        );
    }
}
