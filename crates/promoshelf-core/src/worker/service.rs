//! Worker lifecycle and fetch handling.

use std::sync::Arc;

use futures::future::try_join_all;
use reqwest::Url;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::cache::CacheStorage;
use super::policy::{classify, Route};
use super::{WorkerConfig, WorkerError};
use crate::net::{resolve, Network, NetworkError, Request, RequestMode, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    NotInstalled,
    /// Shell cached. Requests are already served (no waiting phase).
    Installed,
    /// Old caches purged, clients claimed.
    Activated,
    /// Has handled at least one request since activation.
    Serving,
}

/// Outcome of intercepting a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchDecision {
    /// Not intercepted; the caller goes to the network itself.
    Passthrough,
    Respond(Response),
}

pub struct ServiceWorker<N> {
    network: Arc<N>,
    caches: CacheStorage,
    config: WorkerConfig,
    origin: Url,
    state: WorkerState,
    claimed: bool,
    pending: Vec<JoinHandle<()>>,
}

impl<N: Network> ServiceWorker<N> {
    /// A fresh worker for the site at `origin`.
    pub fn new(network: Arc<N>, caches: CacheStorage, config: WorkerConfig, origin: Url) -> Self {
        Self {
            network,
            caches,
            config,
            origin,
            state: WorkerState::NotInstalled,
            claimed: false,
            pending: Vec::new(),
        }
    }

    /// A worker picking up an existing cache store: installed if the shell
    /// cache is already there, activated if that shell cache was the one
    /// last activated.
    pub fn resume(network: Arc<N>, caches: CacheStorage, config: WorkerConfig, origin: Url) -> Self {
        let installed = caches.has(&config.shell_cache);
        let activated = installed && caches.active().as_deref() == Some(config.shell_cache.as_str());
        let mut worker = Self::new(network, caches, config, origin);
        if activated {
            worker.state = WorkerState::Activated;
            worker.claimed = true;
        } else if installed {
            worker.state = WorkerState::Installed;
        }
        worker
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    pub fn caches(&self) -> &CacheStorage {
        &self.caches
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Absolute URL for a site path such as `/offline.html`.
    pub fn asset_url(&self, path: &str) -> Result<Url, WorkerError> {
        Ok(resolve(&self.origin, path.trim_start_matches('/'))?)
    }

    fn asset_key(&self, path: &str) -> Option<String> {
        self.asset_url(path).ok().map(|url| Request::get(url).cache_key())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Fetch every shell asset and store them together. Any failure fails
    /// the install and nothing is stored.
    pub async fn install(&mut self) -> Result<(), WorkerError> {
        let requests = self
            .config
            .shell_assets
            .iter()
            .map(|path| self.asset_url(path).map(Request::get))
            .collect::<Result<Vec<_>, _>>()?;

        let network = &self.network;
        let responses = try_join_all(requests.iter().map(|req| async move {
            let response = network.fetch(req).await.map_err(|e| WorkerError::InstallFailed {
                url: req.url.to_string(),
                reason: e.to_string(),
            })?;
            if !response.is_success() {
                return Err(WorkerError::InstallFailed {
                    url: req.url.to_string(),
                    reason: format!("status {}", response.status),
                });
            }
            Ok((req.cache_key(), response))
        }))
        .await?;

        self.caches.put_all(&self.config.shell_cache, responses)?;
        if self.state == WorkerState::NotInstalled {
            self.state = WorkerState::Installed;
        }
        info!(cache = %self.config.shell_cache, assets = requests.len(), "Worker installed");
        Ok(())
    }

    /// Delete every cache this worker does not own and claim clients.
    /// Returns the deleted cache names.
    pub fn activate(&mut self) -> Result<Vec<String>, WorkerError> {
        if self.state == WorkerState::NotInstalled {
            return Err(WorkerError::NotInstalled);
        }
        let mut deleted = Vec::new();
        for name in self.caches.keys() {
            if !self.config.owns_cache(&name) {
                self.caches.delete(&name)?;
                debug!(cache = %name, "Deleted stale cache");
                deleted.push(name);
            }
        }
        self.caches.set_active(&self.config.shell_cache)?;
        self.claimed = true;
        self.state = WorkerState::Activated;
        info!(deleted = deleted.len(), "Worker activated");
        Ok(deleted)
    }

    // =========================================================================
    // Fetch
    // =========================================================================

    /// Intercept one request.
    pub async fn handle_fetch(&mut self, request: &Request) -> Result<FetchDecision, WorkerError> {
        if self.state == WorkerState::NotInstalled {
            return Ok(FetchDecision::Passthrough);
        }
        if self.state == WorkerState::Activated {
            self.state = WorkerState::Serving;
        }

        let route = classify(request, &self.config);
        debug!(url = %request.url, ?route, "Intercepted");
        let response = match route {
            Route::Passthrough => return Ok(FetchDecision::Passthrough),
            Route::StaleWhileRevalidate => self.stale_while_revalidate(request).await?,
            Route::ShellCacheFirst => self.shell_cache_first(request).await?,
            Route::CacheThenNetwork => self.cache_then_network(request).await?,
        };
        Ok(FetchDecision::Respond(response))
    }

    /// Like `handle_fetch`, but a passthrough goes to the network directly.
    pub async fn fetch(&mut self, request: &Request) -> Result<Response, WorkerError> {
        match self.handle_fetch(request).await? {
            FetchDecision::Respond(response) => Ok(response),
            FetchDecision::Passthrough => Ok(self.network.fetch(request).await?),
        }
    }

    /// Wait for every background revalidation started so far.
    pub async fn settle(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "Revalidation task failed");
            }
        }
    }

    async fn stale_while_revalidate(&mut self, request: &Request) -> Result<Response, WorkerError> {
        let runtime = self.config.runtime_cache.clone();
        let key = request.cache_key();

        if let Some(cached) = self.caches.match_in(&runtime, &key) {
            self.spawn_revalidate(request.clone());
            return Ok(cached);
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    if let Err(e) = self.caches.put(&runtime, &key, response.clone()) {
                        warn!(url = %request.url, error = %e, "Failed to store runtime response");
                    }
                }
                Ok(response)
            }
            Err(e) => {
                let fallback = self
                    .config
                    .image_fallback
                    .as_deref()
                    .and_then(|path| self.asset_key(path))
                    .and_then(|key| self.caches.match_any(&key));
                match fallback {
                    Some(response) => Ok(response),
                    None => Err(WorkerError::Network(e)),
                }
            }
        }
    }

    fn spawn_revalidate(&mut self, request: Request) {
        let network = Arc::clone(&self.network);
        let caches = self.caches.clone();
        let runtime = self.config.runtime_cache.clone();

        let handle = tokio::spawn(async move {
            match network.fetch(&request).await {
                Ok(response) if response.is_cacheable() => {
                    if let Err(e) = caches.put(&runtime, &request.cache_key(), response) {
                        warn!(url = %request.url, error = %e, "Failed to store revalidated response");
                    }
                }
                Ok(response) => {
                    debug!(url = %request.url, status = response.status, "Revalidation not cacheable");
                }
                Err(e) => debug!(url = %request.url, error = %e, "Revalidation failed, keeping cached copy"),
            }
        });
        self.pending.retain(|h| !h.is_finished());
        self.pending.push(handle);
    }

    async fn shell_cache_first(&self, request: &Request) -> Result<Response, WorkerError> {
        let key = request.cache_key();
        if let Some(cached) = self.caches.match_any(&key) {
            return Ok(cached);
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    if let Err(e) = self.caches.put(&self.config.shell_cache, &key, response.clone()) {
                        warn!(url = %request.url, error = %e, "Failed to store shell response");
                    }
                }
                Ok(response)
            }
            Err(e) => self.offline_fallback(request, e),
        }
    }

    async fn cache_then_network(&self, request: &Request) -> Result<Response, WorkerError> {
        if let Some(cached) = self.caches.match_any(&request.cache_key()) {
            return Ok(cached);
        }
        match self.network.fetch(request).await {
            Ok(response) => Ok(response),
            Err(e) => self.offline_fallback(request, e),
        }
    }

    /// Navigations get the cached offline page; anything else is rejected.
    fn offline_fallback(&self, request: &Request, error: NetworkError) -> Result<Response, WorkerError> {
        debug!(url = %request.url, error = %error, "Network failed");
        if request.mode == RequestMode::Navigate {
            if let Some(page) = self
                .asset_key(&self.config.offline_page)
                .and_then(|key| self.caches.match_any(&key))
            {
                return Ok(page);
            }
        }
        Err(WorkerError::NoMatch(request.url.to_string()))
    }
}
