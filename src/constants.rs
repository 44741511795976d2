//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Seconds to wait for a pooled connection before giving up
pub const DATABASE_ACQUIRE_TIMEOUT_SECONDS: u64 = 5;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Leeway in seconds applied when validating token expiry
pub const JWT_LEEWAY_SECONDS: u64 = 30;

// =============================================================================
// COUNT ESTIMATION
// =============================================================================

/// Prefix of every cached listing count key
pub const COUNT_CACHE_PREFIX: &str = "adm";

/// Cached counts live for one hour
pub const DEFAULT_COUNT_CACHE_TTL_SECONDS: u64 = 3600;

/// Statement timeout for filtered exact counts, in milliseconds
pub const DEFAULT_COUNT_TIMEOUT_MS: u64 = 2000;

/// Which cache backend holds listing counts
pub mod cache_backends {
    pub const REDIS: &str = "redis";
    pub const MEMORY: &str = "memory";

    /// All supported cache backends
    pub const ALL: &[&str] = &[REDIS, MEMORY];
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 500;

/// Query parameter carrying the page number
pub const PAGE_VAR: &str = "p";

/// Query parameter carrying the ordering indexes
pub const ORDER_VAR: &str = "o";

/// Query parameter carrying the search term
pub const SEARCH_VAR: &str = "q";

/// Query parameter carrying a field-name sort request
pub const SORT_BY_VAR: &str = "sort_by";

// =============================================================================
// ADMIN LISTINGS
// =============================================================================

/// Fields that are never editable in admin forms
pub const DEFAULT_READONLY_FIELDS: &[&str] = &["created", "modified"];

/// Model name of the content-type registry, never offered for autocomplete
pub const CONTENT_TYPE_MODEL: &str = "contenttype";

/// JSON editor height for documents with content
pub const JSON_EDITOR_HEIGHT: &str = "300px";

/// JSON editor height for empty documents
pub const JSON_EDITOR_EMPTY_HEIGHT: &str = "100px";

/// Raw JSON values treated as empty by the editor
pub const EMPTY_JSON_VALUES: &[&str] = &["{}", "[]", "", "null"];

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum search term length
pub const MAX_SEARCH_TERM_LENGTH: u64 = 256;

// =============================================================================
// API VERSIONING
// =============================================================================

/// Ranking application mount point
pub const RANKING_BASE_PATH: &str = "/ranking";

/// Admin mount point
pub const ADMIN_BASE_PATH: &str = "/admin";
