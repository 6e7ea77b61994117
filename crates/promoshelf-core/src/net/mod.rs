//! Request/response types and the `Network` seam.
//!
//! Everything that leaves the process goes through a `Network`: the data
//! loader, the offline cache worker's install step and its revalidations.
//! Implementations:
//!
//! - `HttpNetwork`: real HTTP via reqwest
//! - `SiteDirectory`: serves a local site folder like a static host
//! - `OfflineNetwork`: fails every request, for offline runs and tests

pub mod http;
pub mod site;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpNetwork;
pub use reqwest::{Method, Url};
pub use site::{OfflineNetwork, SiteDirectory};

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Network unavailable")]
    Offline,

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// How the request was initiated. Only navigations get the offline page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    Navigate,
    #[default]
    Cors,
    NoCors,
    SameOrigin,
}

/// What the response will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Empty,
    Document,
    Image,
    Script,
    Style,
    Manifest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub mode: RequestMode,
    pub destination: Destination,
}

impl Request {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            mode: RequestMode::default(),
            destination: Destination::default(),
        }
    }

    pub fn navigate(url: Url) -> Self {
        Self {
            mode: RequestMode::Navigate,
            destination: Destination::Document,
            ..Self::get(url)
        }
    }

    pub fn image(url: Url) -> Self {
        Self {
            destination: Destination::Image,
            ..Self::get(url)
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Cache key for this request: the URL without its fragment.
    pub fn cache_key(&self) -> String {
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.to_string()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(skip)]
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            url: url.into(),
            content_type: None,
            body,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Only plain 200 responses are worth storing in a cache.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that can turn a `Request` into a `Response`.
///
/// HTTP error statuses are still `Ok` responses; `Err` means the request
/// never completed (offline, DNS, refused connection).
pub trait Network: Send + Sync + 'static {
    fn fetch(&self, request: &Request) -> impl Future<Output = Result<Response, NetworkError>> + Send;
}

/// The transports a configured site can use, behind one type.
#[derive(Clone)]
pub enum SiteNetwork {
    Http(HttpNetwork),
    Directory(SiteDirectory),
    Offline(OfflineNetwork),
}

impl Network for SiteNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        match self {
            Self::Http(net) => net.fetch(request).await,
            Self::Directory(net) => net.fetch(request).await,
            Self::Offline(net) => net.fetch(request).await,
        }
    }
}

/// Resolve `path` against `base`, keeping the base's directory.
pub fn resolve(base: &Url, path: &str) -> Result<Url, NetworkError> {
    base.join(path)
        .map_err(|e| NetworkError::InvalidUrl(format!("{} ({})", path, e)))
}
