//! Form widget overrides for admin fields

use serde::Serialize;
use serde_json::Value;

use crate::constants::{EMPTY_JSON_VALUES, JSON_EDITOR_EMPTY_HEIGHT, JSON_EDITOR_HEIGHT};

use super::listing::{FieldKind, ListingConfig, ModelField};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    TextInput,
    Textarea,
    NumberInput,
    Checkbox,
    DateTimeInput,
    JsonEditor { mode: String, height: String },
    Select { model: String },
    SelectMultiple { model: String },
    Autocomplete { model: String, multiple: bool },
}

/// One field of the change form
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: String,
    pub widget: Widget,
    pub readonly: bool,
}

/// Widget for `field`, `None` for fields without a form input
pub fn widget_for(field: &ModelField, config: &ListingConfig, value: Option<&Value>) -> Option<Widget> {
    let listed = |fields: &[String]| fields.iter().any(|f| *f == field.name);

    let widget = match &field.kind {
        FieldKind::Char if listed(config.textarea_fields.as_slice()) => Widget::Textarea,
        FieldKind::Char => Widget::TextInput,
        FieldKind::Text if listed(config.one_line_fields.as_slice()) => Widget::TextInput,
        FieldKind::Text => Widget::Textarea,
        FieldKind::Json => Widget::JsonEditor {
            mode: "code".to_string(),
            height: json_editor_height(value).to_string(),
        },
        FieldKind::AutoId | FieldKind::Integer | FieldKind::Float => Widget::NumberInput,
        FieldKind::Boolean => Widget::Checkbox,
        FieldKind::DateTime => Widget::DateTimeInput,
        FieldKind::ForeignKey(to) | FieldKind::OneToOne(to) => {
            if config.uses_autocomplete(&field.name) {
                Widget::Autocomplete {
                    model: to.clone(),
                    multiple: false,
                }
            } else {
                Widget::Select { model: to.clone() }
            }
        }
        FieldKind::ManyToMany(to) => {
            if config.uses_autocomplete(&field.name) {
                Widget::Autocomplete {
                    model: to.clone(),
                    multiple: true,
                }
            } else {
                Widget::SelectMultiple { model: to.clone() }
            }
        }
        FieldKind::GenericRelation | FieldKind::Reverse(_) => return None,
    };

    Some(widget)
}

/// Change form fields of `config`'s model, filled from `object`
pub fn form_fields(config: &ListingConfig, object: Option<&Value>) -> Vec<FormField> {
    config
        .model
        .fields
        .iter()
        .filter_map(|field| {
            let value = object.and_then(|o| field.column().and_then(|c| o.get(c)));
            widget_for(field, config, value).map(|widget| FormField {
                name: field.name.clone(),
                widget,
                readonly: config.is_readonly(&field.name),
            })
        })
        .collect()
}

/// Empty documents get a short editor, judged on the serialized value
fn json_editor_height(value: Option<&Value>) -> &'static str {
    let raw = value.map(Value::to_string).unwrap_or_default();
    if EMPTY_JSON_VALUES.contains(&raw.as_str()) {
        JSON_EDITOR_EMPTY_HEIGHT
    } else {
        JSON_EDITOR_HEIGHT
    }
}
