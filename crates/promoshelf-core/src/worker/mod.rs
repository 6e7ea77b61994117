//! Offline cache worker.
//!
//! Runs beside the page with its own lifecycle (install, activate, fetch).
//! It shares nothing with the page except the cache store.
//!
//! - `cache`: named caches of responses, on disk or in memory
//! - `policy`: which route a request takes
//! - `service`: the lifecycle and the fetch handler
//! - `client`: the worker seen as a `Network` by the page

pub mod cache;
pub mod client;
pub mod policy;
pub mod service;

use thiserror::Error;

use crate::net::NetworkError;

pub use cache::{CacheEntry, CacheStorage};
pub use client::WorkerClient;
pub use policy::{classify, is_shell_asset, Route};
pub use service::{FetchDecision, ServiceWorker, WorkerState};

/// Cache holding the pre-cached app shell.
pub const SHELL_CACHE: &str = "promoshelf-shell-v1";

/// Cache filled at runtime by image and banner requests.
pub const RUNTIME_CACHE: &str = "promoshelf-runtime-v1";

pub const OFFLINE_PAGE: &str = "/offline.html";

/// Path fragment that marks a banner asset.
pub const BANNER_PATH: &str = "/assets/banners/";

/// Files needed to render the app with no network.
pub const SHELL_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/home.html",
    "/saved.html",
    "/offline.html",
    "/styles.css",
    "/js/app.js",
    "/manifest.webmanifest",
    "/data/promos.json",
    "/data/faq.json",
    "/assets/icons/icon-192.png",
    "/assets/icons/icon-512.png",
];

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Worker is not installed")]
    NotInstalled,

    #[error("Install failed on {url}: {reason}")]
    InstallFailed { url: String, reason: String },

    #[error("No cached response and network failed: {0}")]
    NoMatch(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Cache storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Cache index error: {0}")]
    Index(#[from] serde_json::Error),
}

/// Cache names and asset paths the worker is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub shell_cache: String,
    pub runtime_cache: String,
    pub shell_assets: Vec<String>,
    pub offline_page: String,
    /// Served for image requests that miss the cache while offline.
    pub image_fallback: Option<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            shell_cache: SHELL_CACHE.to_string(),
            runtime_cache: RUNTIME_CACHE.to_string(),
            shell_assets: SHELL_ASSETS.iter().map(|s| s.to_string()).collect(),
            offline_page: OFFLINE_PAGE.to_string(),
            image_fallback: None,
        }
    }
}

impl WorkerConfig {
    /// Whether `name` is one of the caches this worker owns.
    pub fn owns_cache(&self, name: &str) -> bool {
        name == self.shell_cache || name == self.runtime_cache
    }
}
