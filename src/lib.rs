//! sitemap-check: sitemap-driven page hygiene checks
//!
//! This crate fetches every URL declared in a site's sitemap, runs a battery of
//! metadata and security-header checks against each response, and aggregates
//! the results into a pass/warn/fail summary with a scriptable exit code.

pub mod checks;
pub mod config;
pub mod crawler;
pub mod output;
pub mod sitemap;

use thiserror::Error;

/// Main error type for sitemap-check operations
///
/// Every variant here is fatal to a batch. Problems local to a single URL or a
/// single check never surface as this type; they become part of the results.
#[derive(Debug, Error)]
pub enum SitemapCheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown check identifier: {0}")]
    UnknownCheck(String),

    #[error("Check registered more than once: {0}")]
    DuplicateCheck(String),
}

/// Errors raised while fetching a single page
///
/// These are isolated to the page that produced them.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {path}")]
    Timeout { path: String },

    #[error("Connection failed for {path}: {message}")]
    Connect { path: String, message: String },

    #[error("HTTP error for {path}: {source}")]
    Http { path: String, source: reqwest::Error },

    #[error("Failed to read body of {path}: {message}")]
    Body { path: String, message: String },

    #[error("Invalid request path {path}: {message}")]
    InvalidPath { path: String, message: String },
}

/// Errors raised while resolving the list of URLs to check
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to fetch sitemap {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Sitemap {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed sitemap {url}: {message}")]
    Malformed { url: String, message: String },

    #[error("No URLs found in sitemap {0}")]
    Empty(String),
}

/// Result type alias for sitemap-check operations
pub type Result<T> = std::result::Result<T, SitemapCheckError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for single-page fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use checks::{CheckRegistry, CheckResult, Classification, FetchedResponse};
pub use config::Config;
pub use crawler::{PageOutcome, PageResult, Pipeline};
pub use output::{summarize, BatchSummary};
pub use sitemap::UrlRecord;
