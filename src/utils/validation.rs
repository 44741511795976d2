//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("valid identifier regex"));

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex"));

/// Validate a table or column name used in generated SQL
pub fn validate_identifier(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("Identifier cannot be empty");
    }
    if name.len() > 63 {
        return Err("Identifier must be at most 63 characters");
    }
    if !IDENTIFIER.is_match(name) {
        return Err("Identifier can only contain lowercase letters, digits and underscores");
    }
    Ok(())
}

/// Validate a contest slug
pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if !SLUG.is_match(slug) {
        return Err("Slug can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("content_type").is_ok());
        assert!(validate_identifier("_private").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1abc").is_err());
        assert!(validate_identifier("name; DROP TABLE").is_err());
        assert!(validate_identifier("Name").is_err());
        assert!(validate_identifier(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("codeforces-round-900").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("a/b").is_err());
    }
}
