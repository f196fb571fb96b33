//! Sitemap sources and URL records
//!
//! A sitemap source produces the entries a site declares. Entries become
//! [`UrlRecord`]s, the unit of work for the pipeline.

mod discovery;
mod parser;

pub use discovery::{build_sitemap_client, sitemaps_from_robots, XmlSitemapSource, MAX_INDEX_DEPTH};
pub use parser::{parse_sitemap, SitemapDocument};

use crate::config::Config;
use crate::SitemapError;
use async_trait::async_trait;
use serde::Serialize;
use url::Url;

/// One `<url>` entry exactly as the sitemap declares it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    pub loc: Option<String>,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

impl SitemapEntry {
    pub fn with_loc(loc: impl Into<String>) -> Self {
        Self {
            loc: Some(loc.into()),
            ..Self::default()
        }
    }
}

/// A URL to check, with the sitemap metadata it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlRecord {
    pub target_url: String,
    pub entry: SitemapEntry,
}

impl UrlRecord {
    pub fn new(target_url: impl Into<String>) -> Self {
        let target_url = target_url.into();
        Self {
            entry: SitemapEntry::with_loc(target_url.clone()),
            target_url,
        }
    }

    /// Builds a record from an entry, or `None` if it has no usable location
    pub fn from_entry(entry: SitemapEntry) -> Option<Self> {
        let target_url = entry.loc.as_deref().map(str::trim)?;
        if target_url.is_empty() {
            return None;
        }
        Some(Self {
            target_url: target_url.to_string(),
            entry,
        })
    }

    /// Path (and query) to request from the site under test
    ///
    /// Absolute URLs keep only their path and query. Relative locations are
    /// rooted at `/`.
    pub fn request_path(&self) -> Result<String, url::ParseError> {
        match Url::parse(&self.target_url) {
            Ok(url) => {
                let mut path = url.path().to_string();
                if let Some(query) = url.query() {
                    path.push('?');
                    path.push_str(query);
                }
                Ok(path)
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                if self.target_url.starts_with('/') {
                    Ok(self.target_url.clone())
                } else {
                    Ok(format!("/{}", self.target_url))
                }
            }
            Err(e) => Err(e),
        }
    }
}

/// Something that can list a site's sitemap entries
#[async_trait]
pub trait SitemapSource: Send + Sync {
    async fn entries(&self) -> Result<Vec<SitemapEntry>, SitemapError>;

    /// Human-readable origin, used in logs and errors
    fn describe(&self) -> String;
}

/// Resolves a source into URL records
///
/// Entries without a location are skipped. A source that yields nothing
/// usable is an error.
pub async fn collect_url_records(
    source: &dyn SitemapSource,
) -> Result<Vec<UrlRecord>, SitemapError> {
    let entries = source.entries().await?;
    let declared = entries.len();

    let records: Vec<UrlRecord> = entries.into_iter().filter_map(UrlRecord::from_entry).collect();

    if records.len() < declared {
        tracing::debug!(
            "Skipped {} sitemap entries without a location",
            declared - records.len()
        );
    }

    if records.is_empty() {
        return Err(SitemapError::Empty(source.describe()));
    }

    tracing::info!("Loaded {} URLs from {}", records.len(), source.describe());
    Ok(records)
}

/// A fixed list of URLs from configuration
#[derive(Debug, Clone)]
pub struct StaticSitemapSource {
    urls: Vec<String>,
}

impl StaticSitemapSource {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

#[async_trait]
impl SitemapSource for StaticSitemapSource {
    async fn entries(&self) -> Result<Vec<SitemapEntry>, SitemapError> {
        Ok(self.urls.iter().map(SitemapEntry::with_loc).collect())
    }

    fn describe(&self) -> String {
        "configured URL list".to_string()
    }
}

/// Picks the source the configuration asks for
///
/// An explicit `[site] urls` list wins over sitemap discovery.
pub fn source_for(config: &Config) -> crate::Result<Box<dyn SitemapSource>> {
    if !config.site.urls.is_empty() {
        return Ok(Box::new(StaticSitemapSource::new(config.site.urls.clone())));
    }

    Ok(Box::new(XmlSitemapSource::from_config(config)?))
}
