//! XML sitemap parsing
//!
//! Handles both `<urlset>` documents and `<sitemapindex>` documents. Element
//! names are matched on their local part, so namespace prefixes are ignored.

use super::SitemapEntry;
use crate::SitemapError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed sitemap file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// A `<urlset>` listing pages
    UrlSet(Vec<SitemapEntry>),

    /// A `<sitemapindex>` listing further sitemaps
    Index(Vec<String>),
}

/// Parses a sitemap document fetched from `url`
pub fn parse_sitemap(xml: &str, url: &str) -> Result<SitemapDocument, SitemapError> {
    let malformed = |message: String| SitemapError::Malformed {
        url: url.to_string(),
        message,
    };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut root: Option<String> = None;
    let mut entries = Vec::new();
    let mut children = Vec::new();
    let mut current: Option<SitemapEntry> = None;
    let mut current_tag = String::new();
    // Element nesting depth; the root sits at 1 and its entries at 2
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if root.is_none() {
                    if name != "urlset" && name != "sitemapindex" {
                        return Err(malformed(format!("unexpected root element <{}>", name)));
                    }
                    root = Some(name);
                } else if depth == 2 && (name == "url" || name == "sitemap") {
                    current = Some(SitemapEntry::default());
                } else if depth == 3 {
                    current_tag = name;
                } else {
                    // Extension blocks such as <image:image> carry their own <loc>
                    current_tag.clear();
                }
            }
            Ok(Event::Empty(ref e)) => {
                if root.is_none() {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    if name != "urlset" && name != "sitemapindex" {
                        return Err(malformed(format!("unexpected root element <{}>", name)));
                    }
                    root = Some(name);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(entry) = current.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| malformed(e.to_string()))?
                        .trim()
                        .to_string();
                    assign(entry, &current_tag, text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(entry) = current.as_mut() {
                    let text = String::from_utf8_lossy(e).trim().to_string();
                    assign(entry, &current_tag, text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let closed_depth = depth;
                depth = depth.saturating_sub(1);
                if closed_depth == 2 && (name == "url" || name == "sitemap") {
                    if let Some(entry) = current.take() {
                        if root.as_deref() == Some("sitemapindex") {
                            if let Some(loc) = entry.loc.filter(|loc| !loc.is_empty()) {
                                children.push(loc);
                            }
                        } else {
                            entries.push(entry);
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(malformed(format!(
                    "{} at byte {}",
                    e,
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    match root.as_deref() {
        Some("urlset") => Ok(SitemapDocument::UrlSet(entries)),
        Some(_) => Ok(SitemapDocument::Index(children)),
        None => Err(malformed("no <urlset> or <sitemapindex> element".to_string())),
    }
}

fn assign(entry: &mut SitemapEntry, tag: &str, text: String) {
    if text.is_empty() {
        return;
    }
    match tag {
        "loc" => entry.loc = Some(text),
        "lastmod" => entry.lastmod = Some(text),
        "changefreq" => entry.changefreq = Some(text),
        "priority" => entry.priority = Some(text),
        _ => {}
    }
}
