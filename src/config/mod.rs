//! Configuration for the streaming search client
//!
//! This module provides the `SearchConfig` struct and its type-safe builder,
//! with validation and sensible defaults resolved at build time.

// Sub-modules
pub mod builder;
pub mod types;

// Re-exports for public API
pub use builder::{SearchConfigBuilder, WithCsrfToken, WithOrigin};
pub use types::{DEFAULT_MIN_QUERY_LEN, DEFAULT_SEARCH_PATH, QUERY_PARAM, SearchConfig};
