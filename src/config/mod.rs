//! Configuration module for sitemap-check
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_check::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitemap-check.toml")).unwrap();
//! println!("Checking {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ChecksConfig, ConcurrencyConfig, Config, FetcherConfig, OutputConfig, ReportFormat,
    SiteConfig, WorkerCount,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
