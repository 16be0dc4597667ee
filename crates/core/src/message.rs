//! Request and response values exchanged with the cache store and the network.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Error;

/// A request as seen by the cache manager: method plus fragment-free URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Request {
    method: String,
    url: Url,
}

impl Request {
    /// Build a request, uppercasing the method and dropping any fragment.
    pub fn new(method: &str, mut url: Url) -> Self {
        url.set_fragment(None);
        Self { method: method.trim().to_ascii_uppercase(), url }
    }

    /// Shorthand for a GET request.
    pub fn get(url: Url) -> Self {
        Self::new("GET", url)
    }

    /// Resolve `input` against `base` and build a GET request.
    pub fn get_relative(base: &Url, input: &str) -> Result<Self, Error> {
        resolve(base, input).map(Self::get)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Resolve `input` the way a page under `base` would.
///
/// Absolute URLs are taken as-is and anything else joins onto `base`.
/// Only http and https are accepted; the fragment is dropped and the
/// query string kept.
pub fn resolve(base: &Url, input: &str) -> Result<Url, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("empty URL".into()));
    }

    let mut url = base
        .join(trimmed)
        .map_err(|e| Error::InvalidUrl(format!("{trimmed}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(Error::InvalidUrl(format!("{trimmed}: unsupported scheme {scheme}"))),
    }

    url.set_fragment(None);
    Ok(url)
}

/// A captured response: status, headers and the full body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// URL the body was finally served from, after redirects.
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Whether the status is in the 2xx range.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
