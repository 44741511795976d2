//! Changelist ordering
//!
//! The changelist orders by `o=<indexes>`: dot-separated, 1-based,
//! optionally negated positions in `list_display`. `sort_by=<field>` is a
//! friendlier alias that gets redirected to the matching `o`.

use crate::{
    constants::{ORDER_VAR, SORT_BY_VAR},
    pagination::OrderBy,
};

use super::listing::ListingConfig;

/// Location to redirect a `sort_by` request to.
///
/// `None` when there is no `sort_by` or it names a column outside
/// `list_display`; the listing is rendered as requested then.
pub fn sort_by_redirect(path: &str, params: &[(String, String)], list_display: &[String]) -> Option<String> {
    let sort_by = params
        .iter()
        .find(|(key, _)| key == SORT_BY_VAR)
        .map(|(_, value)| value.as_str())?;

    let field = sort_by.trim_start_matches('-');
    let position = list_display.iter().position(|f| f == field)? as i64 + 1;
    let index = if sort_by.starts_with('-') { -position } else { position };

    let mut rewritten: Vec<(String, String)> = params
        .iter()
        .filter(|(key, _)| key != SORT_BY_VAR && key != ORDER_VAR)
        .cloned()
        .collect();
    rewritten.push((ORDER_VAR.to_string(), index.to_string()));

    Some(format!("{}?{}", path, encode_query(&rewritten)))
}

/// Ordering for a changelist request.
///
/// Invalid `o` entries are skipped. Without any valid entry the listing's
/// default ordering applies. `id` is appended as a tie-breaker so pages
/// stay stable.
pub fn resolve_ordering(config: &ListingConfig, order_param: Option<&str>) -> Vec<OrderBy> {
    let mut ordering: Vec<OrderBy> = order_param
        .map(|raw| parse_order_param(raw, &config.list_display))
        .unwrap_or_default();

    if ordering.is_empty() {
        ordering = config.ordering.clone();
    }

    if !ordering.iter().any(|o| o.column == "id") {
        ordering.push(OrderBy::desc("id"));
    }
    ordering
}

fn parse_order_param(raw: &str, list_display: &[String]) -> Vec<OrderBy> {
    let mut ordering: Vec<OrderBy> = Vec::new();
    for part in raw.split('.') {
        let (descending, index) = match part.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, part),
        };
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };
        let Some(column) = index.checked_sub(1).and_then(|i| list_display.get(i)) else {
            continue;
        };
        if ordering.iter().any(|o| &o.column == column) {
            continue;
        }
        ordering.push(OrderBy {
            column: column.clone(),
            descending,
        });
    }
    ordering
}

fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
