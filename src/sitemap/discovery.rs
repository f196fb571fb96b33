//! Sitemap discovery and fetching over HTTP
//!
//! The sitemap location is taken from configuration when set, otherwise from
//! the `Sitemap:` lines of the site's robots.txt, otherwise `/sitemap.xml`.
//! Sitemap index files are followed to a bounded depth.

use super::parser::{parse_sitemap, SitemapDocument};
use super::{SitemapEntry, SitemapSource};
use crate::config::{Config, FetcherConfig};
use crate::SitemapError;
use async_trait::async_trait;
use reqwest::Client;
use robotstxt::{parse_robotstxt, RobotsParseHandler};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// How many levels of sitemap index are followed below the root
pub const MAX_INDEX_DEPTH: usize = 3;

/// Builds the client used for robots.txt and sitemap requests
///
/// Unlike the page client this one follows redirects.
pub fn build_sitemap_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Collects `Sitemap:` values while robots.txt is parsed
#[derive(Debug, Default)]
struct SitemapCollector {
    sitemaps: Vec<String>,
}

impl RobotsParseHandler for SitemapCollector {
    fn handle_robots_start(&mut self) {}

    fn handle_robots_end(&mut self) {}

    fn handle_user_agent(&mut self, _line_num: u32, _user_agent: &str) {}

    fn handle_allow(&mut self, _line_num: u32, _value: &str) {}

    fn handle_disallow(&mut self, _line_num: u32, _value: &str) {}

    fn handle_sitemap(&mut self, _line_num: u32, value: &str) {
        let value = value.trim();
        if !value.is_empty() && !self.sitemaps.iter().any(|s| s == value) {
            self.sitemaps.push(value.to_string());
        }
    }

    fn handle_unknown_action(&mut self, _line_num: u32, _action: &str, _value: &str) {}
}

/// Extracts `Sitemap:` directives from robots.txt content
///
/// The directive name is case-insensitive and applies regardless of user-agent
/// group. Values are returned in file order without duplicates.
pub fn sitemaps_from_robots(content: &str) -> Vec<String> {
    let mut collector = SitemapCollector::default();
    parse_robotstxt(content, &mut collector);
    collector.sitemaps
}

/// Reads entries from the site's XML sitemaps
#[derive(Debug, Clone)]
pub struct XmlSitemapSource {
    client: Client,
    base_url: Url,
    sitemap_url: Option<String>,
}

impl XmlSitemapSource {
    pub fn new(client: Client, base_url: Url, sitemap_url: Option<String>) -> Self {
        Self {
            client,
            base_url,
            sitemap_url,
        }
    }

    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let base_url = Url::parse(&config.site.base_url)?;
        let client = build_sitemap_client(&config.fetcher)?;
        Ok(Self::new(client, base_url, config.site.sitemap_url.clone()))
    }

    /// Root sitemap URLs to start from
    async fn locate(&self) -> Vec<String> {
        if let Some(url) = &self.sitemap_url {
            return vec![url.clone()];
        }

        match self.robots_sitemaps().await {
            Some(found) if !found.is_empty() => {
                tracing::info!("Found {} sitemap(s) in robots.txt", found.len());
                found
            }
            _ => {
                let fallback = self.resolve("/sitemap.xml");
                tracing::info!("No sitemap declared in robots.txt, trying {}", fallback);
                vec![fallback]
            }
        }
    }

    async fn robots_sitemaps(&self) -> Option<Vec<String>> {
        let robots_url = self.resolve("/robots.txt");
        tracing::debug!("Fetching {}", robots_url);

        let response = match self.client.get(&robots_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Could not fetch {}: {}", robots_url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("{} returned HTTP {}", robots_url, response.status());
            return None;
        }

        let content = response.text().await.ok()?;
        Some(
            sitemaps_from_robots(&content)
                .iter()
                .map(|location| self.resolve(location))
                .collect(),
        )
    }

    fn resolve(&self, location: &str) -> String {
        self.base_url
            .join(location)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| location.to_string())
    }

    async fn fetch_text(&self, url: &str) -> Result<String, SitemapError> {
        tracing::debug!("Fetching sitemap {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SitemapError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SitemapError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| SitemapError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SitemapSource for XmlSitemapSource {
    async fn entries(&self) -> Result<Vec<SitemapEntry>, SitemapError> {
        let mut queue: VecDeque<(String, usize)> =
            self.locate().await.into_iter().map(|url| (url, 0)).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        while let Some((url, depth)) = queue.pop_front() {
            if !seen.insert(url.clone()) {
                continue;
            }

            let xml = self.fetch_text(&url).await?;
            match parse_sitemap(&xml, &url)? {
                SitemapDocument::UrlSet(mut found) => {
                    tracing::debug!("{} lists {} URLs", url, found.len());
                    entries.append(&mut found);
                }
                SitemapDocument::Index(children) => {
                    if depth >= MAX_INDEX_DEPTH {
                        tracing::warn!(
                            "Not following sitemap index {}: nested more than {} levels",
                            url,
                            MAX_INDEX_DEPTH
                        );
                        continue;
                    }
                    tracing::debug!("{} indexes {} sitemaps", url, children.len());
                    for child in children {
                        queue.push_back((self.resolve(&child), depth + 1));
                    }
                }
            }
        }

        Ok(entries)
    }

    fn describe(&self) -> String {
        self.sitemap_url
            .clone()
            .unwrap_or_else(|| self.base_url.to_string())
    }
}
