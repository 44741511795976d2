//! Listing configuration and registry
//!
//! Each admin listing is described by an explicit `ListingConfig` over a
//! `ModelSchema`. Registration validates the identifiers that end up in SQL
//! and, for base models, widens the autocomplete fields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    constants::{CONTENT_TYPE_MODEL, DEFAULT_PAGE_SIZE, DEFAULT_READONLY_FIELDS},
    error::{AppError, AppResult},
    pagination::OrderBy,
    utils::validate_identifier,
};

/// Storage type of a model field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "to", rename_all = "snake_case")]
pub enum FieldKind {
    AutoId,
    Char,
    Text,
    Json,
    Integer,
    Float,
    Boolean,
    DateTime,
    ForeignKey(String),
    OneToOne(String),
    ManyToMany(String),
    /// Generic relation through the content-type registry
    GenericRelation,
    /// Reverse side of another model's relation
    Reverse(String),
}

impl FieldKind {
    /// Forward relation declared on this model (generic ones included)
    pub fn is_related(&self) -> bool {
        matches!(
            self,
            FieldKind::ForeignKey(_)
                | FieldKind::OneToOne(_)
                | FieldKind::ManyToMany(_)
                | FieldKind::GenericRelation
        )
    }

    pub fn related_model(&self) -> Option<&str> {
        match self {
            FieldKind::ForeignKey(to) | FieldKind::OneToOne(to) | FieldKind::ManyToMany(to) => {
                Some(to)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelField {
    pub name: String,
    pub kind: FieldKind,
}

impl ModelField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Column holding the field, `None` when it has no column on this table
    pub fn column(&self) -> Option<String> {
        match &self.kind {
            FieldKind::ForeignKey(_) | FieldKind::OneToOne(_) => Some(format!("{}_id", self.name)),
            FieldKind::ManyToMany(_) | FieldKind::GenericRelation | FieldKind::Reverse(_) => None,
            _ => Some(self.name.clone()),
        }
    }
}

/// Introspected model: its table and fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSchema {
    pub name: String,
    pub table: String,
    /// Derives from the site's timestamped base model
    pub base_model: bool,
    pub fields: Vec<ModelField>,
}

impl ModelSchema {
    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Columns of the table, in declaration order
    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().filter_map(ModelField::column).collect()
    }
}

/// Admin customization of one listing
#[derive(Debug, Clone, Serialize)]
pub struct ListingConfig {
    pub name: String,
    pub model: ModelSchema,
    /// Columns shown in the changelist, also the targets of `o` indexes
    pub list_display: Vec<String>,
    pub search_fields: Vec<String>,
    /// Also match the whole search term, not only its words
    pub search_entirely: bool,
    pub ordering: Vec<OrderBy>,
    pub textarea_fields: Vec<String>,
    pub one_line_fields: Vec<String>,
    /// `None` leaves autocomplete off; `Some` is widened on registration
    pub autocomplete_fields: Option<Vec<String>>,
    pub readonly_fields: Vec<String>,
    pub save_as: bool,
    pub per_page: u32,
}

impl ListingConfig {
    pub fn new(name: impl Into<String>, model: ModelSchema) -> Self {
        Self {
            name: name.into(),
            model,
            list_display: Vec::new(),
            search_fields: Vec::new(),
            search_entirely: false,
            ordering: vec![OrderBy::desc("id")],
            textarea_fields: Vec::new(),
            one_line_fields: Vec::new(),
            autocomplete_fields: None,
            readonly_fields: DEFAULT_READONLY_FIELDS.iter().map(|f| f.to_string()).collect(),
            save_as: true,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn list_display(mut self, fields: &[&str]) -> Self {
        self.list_display = to_strings(fields);
        self
    }

    pub fn search_fields(mut self, fields: &[&str]) -> Self {
        self.search_fields = to_strings(fields);
        self
    }

    pub fn search_entirely(mut self, enabled: bool) -> Self {
        self.search_entirely = enabled;
        self
    }

    pub fn ordering(mut self, ordering: &[&str]) -> Self {
        self.ordering = ordering.iter().map(|spec| OrderBy::parse(spec)).collect();
        self
    }

    pub fn textarea_fields(mut self, fields: &[&str]) -> Self {
        self.textarea_fields = to_strings(fields);
        self
    }

    pub fn one_line_fields(mut self, fields: &[&str]) -> Self {
        self.one_line_fields = to_strings(fields);
        self
    }

    pub fn autocomplete_fields(mut self, fields: &[&str]) -> Self {
        self.autocomplete_fields = Some(to_strings(fields));
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn is_readonly(&self, field: &str) -> bool {
        self.readonly_fields.iter().any(|f| f == field)
    }

    pub fn uses_autocomplete(&self, field: &str) -> bool {
        self.autocomplete_fields
            .as_ref()
            .is_some_and(|fields| fields.iter().any(|f| f == field))
    }

    fn validate(&self) -> AppResult<()> {
        let invalid = |what: &str, name: &str, reason: &str| {
            AppError::Configuration(format!("listing '{}': {} '{}': {}", self.name, what, name, reason))
        };

        validate_identifier(&self.model.table).map_err(|e| invalid("table", &self.model.table, e))?;

        let columns = self.model.columns();
        let ordered = self.ordering.iter().map(|o| &o.column);
        for column in self.list_display.iter().chain(&self.search_fields).chain(ordered) {
            validate_identifier(column).map_err(|e| invalid("column", column, e))?;
            if !columns.contains(column) {
                return Err(invalid("column", column, "not a column of the model"));
            }
        }

        if self.per_page == 0 {
            return Err(invalid("per_page", "0", "must be positive"));
        }

        Ok(())
    }
}

/// Add every forward relation of a base model to its autocomplete fields.
///
/// Generic relations and relations to the content-type registry are left
/// out. Listings without autocomplete, or over other models, are untouched.
pub fn derive_autocomplete_fields(config: &mut ListingConfig) {
    if !config.model.base_model {
        return;
    }
    let Some(fields) = config.autocomplete_fields.as_mut() else {
        return;
    };

    for field in &config.model.fields {
        if fields.contains(&field.name) || !field.kind.is_related() {
            continue;
        }
        if field.kind == FieldKind::GenericRelation {
            continue;
        }
        if field.kind.related_model() == Some(CONTENT_TYPE_MODEL) {
            continue;
        }
        fields.push(field.name.clone());
    }
}

/// Registered listings by name
#[derive(Debug, Clone, Default)]
pub struct AdminRegistry {
    listings: BTreeMap<String, ListingConfig>,
}

impl AdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mut config: ListingConfig) -> AppResult<()> {
        config.validate()?;
        if self.listings.contains_key(&config.name) {
            return Err(AppError::Configuration(format!(
                "listing '{}' is already registered",
                config.name
            )));
        }

        derive_autocomplete_fields(&mut config);
        tracing::debug!(listing = %config.name, table = %config.model.table, "Registered admin listing");
        self.listings.insert(config.name.clone(), config);
        Ok(())
    }

    pub fn get(&self, name: &str) -> AppResult<&ListingConfig> {
        self.listings
            .get(name)
            .ok_or_else(|| AppError::NotFound(format!("Listing '{}' not found", name)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.listings.keys().map(String::as_str)
    }
}

fn to_strings(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}
