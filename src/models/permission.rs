//! Permission model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::admin::{FieldKind, ModelField, ModelSchema};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub content_type_id: i64,
    pub codename: String,
}

impl Permission {
    pub const TABLE: &'static str = "permissions";

    pub fn schema() -> ModelSchema {
        ModelSchema {
            name: "permission".to_string(),
            table: Self::TABLE.to_string(),
            base_model: false,
            fields: vec![
                ModelField::new("id", FieldKind::AutoId),
                ModelField::new("name", FieldKind::Char),
                ModelField::new("content_type", FieldKind::ForeignKey("contenttype".to_string())),
                ModelField::new("codename", FieldKind::Char),
            ],
        }
    }
}
