//! Fetched response model

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::borrow::Cow;

/// A single HTTP response, as seen by the checks
///
/// Header lookups are case-insensitive because `HeaderMap` normalizes names.
#[derive(Debug, Clone, Default)]
pub struct FetchedResponse {
    /// Request path the response was fetched from
    pub path: String,

    /// HTTP status code
    pub status_code: u16,

    /// Response headers
    pub headers: HeaderMap,

    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedResponse {
    pub fn new(path: impl Into<String>, status_code: u16) -> Self {
        Self {
            path: path.into(),
            status_code,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Replaces the body
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a header, ignoring names or values that are not valid HTTP
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Returns a header value as text, if present and printable
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
