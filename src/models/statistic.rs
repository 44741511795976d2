//! Standings row model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::admin::{FieldKind, ModelField, ModelSchema};

/// One participant's row in a contest's standings
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Statistic {
    pub id: i64,
    pub contest_id: i64,
    pub account: String,
    pub place: Option<i32>,
    pub solving: f64,
    pub addition: serde_json::Value,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Statistic {
    pub const TABLE: &'static str = "statistics";

    pub fn schema() -> ModelSchema {
        ModelSchema {
            name: "statistic".to_string(),
            table: Self::TABLE.to_string(),
            base_model: true,
            fields: vec![
                ModelField::new("id", FieldKind::AutoId),
                ModelField::new("contest", FieldKind::ForeignKey("contest".to_string())),
                ModelField::new("account", FieldKind::Char),
                ModelField::new("place", FieldKind::Integer),
                ModelField::new("solving", FieldKind::Float),
                ModelField::new("addition", FieldKind::Json),
                ModelField::new("created", FieldKind::DateTime),
                ModelField::new("modified", FieldKind::DateTime),
            ],
        }
    }
}
