use crate::checks::BUILTIN_CHECK_IDS;
use serde::Deserialize;
use std::fmt;

/// Main configuration structure for sitemap-check
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Creates a configuration with defaults for everything but the site
    pub fn for_site(base_url: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                base_url: base_url.into(),
                sitemap_url: None,
                urls: Vec::new(),
            },
            fetcher: FetcherConfig::default(),
            checks: ChecksConfig::default(),
            concurrency: ConcurrencyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// The site whose sitemap is checked
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin that request paths are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Explicit sitemap location; discovered from robots.txt when absent
    #[serde(rename = "sitemap-url", default)]
    pub sitemap_url: Option<String>,

    /// Explicit list of URLs to check instead of reading a sitemap
    #[serde(default)]
    pub urls: Vec<String>,
}

/// HTTP fetcher settings
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("sitemap-check/{}", env!("CARGO_PKG_VERSION"))
}

/// Which checks run, and how faults inside them are treated
#[derive(Debug, Clone, Deserialize)]
pub struct ChecksConfig {
    /// Ordered check identifiers
    #[serde(default = "default_enabled_checks")]
    pub enabled: Vec<String>,

    /// Record a panicking check as an Error result instead of dropping it
    #[serde(default)]
    pub strict: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_checks(),
            strict: false,
        }
    }
}

fn default_enabled_checks() -> Vec<String> {
    BUILTIN_CHECK_IDS.iter().map(|id| id.to_string()).collect()
}

/// Execution strategy selection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConcurrencyConfig {
    /// Use the worker pool instead of checking pages one at a time
    #[serde(default)]
    pub enabled: bool,

    /// Worker pool size
    #[serde(default)]
    pub workers: WorkerCount,
}

/// Size of the concurrent worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "WorkerCountRepr")]
pub enum WorkerCount {
    /// One worker per available CPU
    #[default]
    Auto,
    /// A fixed number of workers
    Fixed(usize),
}

impl WorkerCount {
    /// Resolves the configured value to a concrete pool size
    pub fn resolve(&self) -> usize {
        match self {
            Self::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            Self::Fixed(n) => (*n).max(1),
        }
    }
}

impl fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fixed(n) => write!(f, "{}", n),
        }
    }
}

impl std::str::FromStr for WorkerCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<usize>()
            .map(Self::Fixed)
            .map_err(|_| format!("expected a positive integer or \"auto\", got '{}'", s))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WorkerCountRepr {
    Count(i64),
    Named(String),
}

impl TryFrom<WorkerCountRepr> for WorkerCount {
    type Error = String;

    fn try_from(repr: WorkerCountRepr) -> Result<Self, Self::Error> {
        match repr {
            WorkerCountRepr::Count(n) if n >= 1 => Ok(Self::Fixed(n as usize)),
            WorkerCountRepr::Count(n) => Err(format!("workers must be >= 1, got {}", n)),
            WorkerCountRepr::Named(name) => name.parse(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Where the report is written
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,

    /// Report format
    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            format: ReportFormat::default(),
        }
    }
}

fn default_report_path() -> String {
    "sitemapcheck_report.md".to_string()
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}
