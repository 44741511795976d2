//! Admin listings
//!
//! Configuration of the admin changelists and the request-level tweaks
//! they support: search widening, `sort_by` redirects, ordering and form
//! widget overrides.

pub mod listing;
pub mod ordering;
pub mod search;
pub mod widgets;

pub use listing::{AdminRegistry, FieldKind, ListingConfig, ModelField, ModelSchema};
pub use ordering::{resolve_ordering, sort_by_redirect};
pub use search::apply_search;
pub use widgets::{form_fields, FormField, Widget};

use crate::{error::AppResult, models};

/// Registry of every listing the site exposes
pub fn site_registry() -> AppResult<AdminRegistry> {
    let mut registry = AdminRegistry::new();

    registry.register(
        ListingConfig::new("permissions", models::Permission::schema())
            .list_display(&["name", "content_type_id", "codename"])
            .search_fields(&["name", "codename"])
            .ordering(&["codename"]),
    )?;

    registry.register(
        ListingConfig::new("contests", models::Contest::schema())
            .list_display(&["id", "title", "host", "start_time", "end_time", "n_statistics"])
            .search_fields(&["title", "host", "slug"])
            .search_entirely(true)
            .ordering(&["-start_time"])
            .textarea_fields(&["title"])
            .one_line_fields(&["standings_url"])
            .autocomplete_fields(&[]),
    )?;

    registry.register(
        ListingConfig::new("statistics", models::Statistic::schema())
            .list_display(&["id", "contest_id", "account", "place", "solving"])
            .search_fields(&["account"])
            .ordering(&["-id"])
            .autocomplete_fields(&[]),
    )?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_registry_builds() {
        let registry = site_registry().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["contests", "permissions", "statistics"]);

        let statistics = registry.get("statistics").unwrap();
        assert_eq!(statistics.autocomplete_fields, Some(vec!["contest".to_string()]));

        // Permission is not a base model: no autocomplete widening
        assert_eq!(registry.get("permissions").unwrap().autocomplete_fields, None);
    }
}
