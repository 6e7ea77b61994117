//! Local stand-ins for the network.

use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use tracing::debug;

use super::{Method, Network, NetworkError, Request, Response};

/// Serves files from a local site folder the way a static host would:
/// the URL path maps onto the folder, `/` maps to `index.html`, and a
/// missing file is a 404 response rather than an error.
#[derive(Debug, Clone)]
pub struct SiteDirectory {
    root: PathBuf,
}

impl SiteDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// File for a percent-encoded URL path, or `None` if it would leave the
    /// site root.
    fn file_for(&self, url_path: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for segment in url_path.split('/') {
            let part = percent_decode_str(segment).decode_utf8().ok()?;
            match part.as_ref() {
                "" | "." => {}
                ".." => return None,
                // An encoded separator would smuggle in another segment
                p if p.contains(['/', '\\']) => return None,
                p => path.push(p),
            }
        }
        if url_path.is_empty() || url_path.ends_with('/') {
            path.push("index.html");
        }
        Some(path)
    }
}

fn content_type_for(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    Some(match ext {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "webmanifest" => "application/manifest+json",
        "png" => "image/png",
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        _ => return None,
    })
}

impl Network for SiteDirectory {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        let url = request.url.to_string();
        if request.method != Method::GET && request.method != Method::HEAD {
            return Ok(Response::new(405, url, Vec::new()));
        }

        let Some(path) = self.file_for(request.path()) else {
            return Ok(Response::new(403, url, Vec::new()));
        };

        debug!(?path, "Serving from site directory");
        match std::fs::read(&path) {
            Ok(body) => {
                let mut response = Response::new(200, url, body);
                response.content_type = content_type_for(&path).map(str::to_string);
                Ok(response)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Response::new(404, url, Vec::new()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// A network that is always down.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNetwork;

impl Network for OfflineNetwork {
    async fn fetch(&self, _request: &Request) -> Result<Response, NetworkError> {
        Err(NetworkError::Offline)
    }
}
