//! Admin response DTOs

use serde::Serialize;
use serde_json::Value;

use crate::{
    admin::FormField,
    pagination::{OrderBy, PageInfo},
};

/// Registered listing
#[derive(Debug, Serialize)]
pub struct ListingSummary {
    pub name: String,
    pub table: String,
    pub list_display: Vec<String>,
    pub search_fields: Vec<String>,
}

/// Admin index
#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub listings: Vec<ListingSummary>,
}

/// One changelist page
#[derive(Debug, Serialize)]
pub struct ChangelistResponse {
    pub listing: String,
    pub list_display: Vec<String>,
    pub search_term: String,
    pub ordering: Vec<OrderBy>,
    pub rows: Vec<Value>,
    pub page: PageInfo,
}

/// Add or change form
#[derive(Debug, Serialize)]
pub struct ChangeFormResponse {
    pub listing: String,
    pub fields: Vec<FormField>,
    /// Current values, absent on the add form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<Value>,
    pub save_as: bool,
}
