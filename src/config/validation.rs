use crate::checks::CheckRegistry;
use crate::config::types::{
    ChecksConfig, ConcurrencyConfig, Config, FetcherConfig, OutputConfig, SiteConfig,
    WorkerCount,
};
use crate::ConfigError;
use url::Url;

const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_WORKERS: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_checks_config(&config.checks)?;
    validate_concurrency_config(&config.concurrency)?;
    validate_output_config(&config.output)?;
    Ok(())
}

fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;

    if let Some(sitemap_url) = &config.sitemap_url {
        validate_http_url("sitemap-url", sitemap_url)?;
    }

    for entry in &config.urls {
        validate_url_entry(entry)?;
    }

    Ok(())
}

/// A `urls` entry is an absolute http(s) URL or a path relative to the base URL
fn validate_url_entry(entry: &str) -> Result<(), ConfigError> {
    match Url::parse(entry) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            if entry.trim().is_empty() || entry.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidUrl(format!(
                    "Invalid urls entry '{}': not a path or URL",
                    entry
                )));
            }
            Ok(())
        }
        _ => validate_http_url("urls", entry),
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Check identifiers are resolved eagerly so a typo fails at startup
fn validate_checks_config(config: &ChecksConfig) -> Result<(), ConfigError> {
    if config.enabled.is_empty() {
        return Err(ConfigError::Validation(
            "at least one check must be enabled".to_string(),
        ));
    }

    CheckRegistry::from_ids(&config.enabled)?;
    Ok(())
}

fn validate_concurrency_config(config: &ConcurrencyConfig) -> Result<(), ConfigError> {
    if let WorkerCount::Fixed(n) = config.workers {
        if n < 1 || n > MAX_WORKERS {
            return Err(ConfigError::Validation(format!(
                "workers must be between 1 and {}, got {}",
                MAX_WORKERS, n
            )));
        }
    }
    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
