//! Changelist search

use crate::pagination::{ListingQuery, Predicate};

use super::listing::ListingConfig;

/// Narrow `query` by a search term.
///
/// Every whitespace-separated word must match, case-insensitively, at least
/// one search field. Listings with `search_entirely` also require the whole
/// term to appear verbatim in one of the fields.
pub fn apply_search(mut query: ListingQuery, config: &ListingConfig, term: &str) -> ListingQuery {
    let term = term.trim();
    if term.is_empty() || config.search_fields.is_empty() {
        return query;
    }

    for word in split_terms(term) {
        let any_field = config
            .search_fields
            .iter()
            .map(|field| Predicate::icontains(field.clone(), word.clone()))
            .collect();
        query = query.filter(Predicate::Any(any_field));
    }

    if config.search_entirely {
        let whole = config
            .search_fields
            .iter()
            .map(|field| Predicate::contains(field.clone(), term))
            .collect();
        query = query.filter(Predicate::Any(whole));
    }

    query
}

/// Split on whitespace, keeping double-quoted phrases together
fn split_terms(term: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in term.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
