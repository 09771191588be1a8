//! # Report Card Config
//!
//! Configuration types for the report card service.
//!
//! Every structure is loaded from environment variables with `from_env()` and
//! falls back to a sensible default when a variable is unset or fails to parse:
//!
//! - [`server`]: listen address
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`template`]: report template location and caching
//! - [`batch`]: batch concurrency, fetch timeout and overall deadline
//! - [`firestore`]: Firestore REST endpoint and credentials
//! - [`school`]: institution identity printed on every report card
//!
//! # Example
//!
//! ```ignore
//! use reportcard_config::{BatchConfig, ServerConfig, TemplateConfig};
//!
//! let server = ServerConfig::from_env();
//! let template = TemplateConfig::from_env();
//! let batch = BatchConfig::from_env();
//! ```

pub mod batch;
pub mod cors;
pub mod firestore;
pub mod school;
pub mod server;
pub mod template;

// Re-export commonly used types at crate root
pub use batch::BatchConfig;
pub use cors::CorsConfig;
pub use firestore::FirestoreConfig;
pub use school::SchoolProfile;
pub use server::ServerConfig;
pub use template::TemplateConfig;

use std::str::FromStr;

/// Reads `key` through `lookup` and parses it, falling back to `default`.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads `key` through `lookup`, treating an empty value as unset.
pub(crate) fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}
