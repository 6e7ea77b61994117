//! Wiring a `Config` to a network, a store and a cache worker.

use std::sync::Arc;

use anyhow::{Context, Result};
use promoshelf_core::config::{Config, SiteLocation};
use promoshelf_core::net::{HttpNetwork, OfflineNetwork, SiteDirectory, SiteNetwork, Url};
use promoshelf_core::worker::{CacheStorage, ServiceWorker, WorkerConfig};
use promoshelf_core::FileStore;
use tracing::debug;

/// Origin used for a site served from a local directory.
const LOCAL_ORIGIN: &str = "http://localhost/";

pub struct Site {
    pub network: SiteNetwork,
    pub origin: Url,
}

pub fn connect(config: &Config) -> Result<Site> {
    let (network, origin) = match config.site_location()? {
        SiteLocation::Remote(url) => {
            let network = if config.offline_mode {
                SiteNetwork::Offline(OfflineNetwork)
            } else {
                SiteNetwork::Http(HttpNetwork::new().context("Failed to build HTTP client")?)
            };
            (network, url)
        }
        SiteLocation::Directory(path) => {
            let network = if config.offline_mode {
                SiteNetwork::Offline(OfflineNetwork)
            } else {
                SiteNetwork::Directory(SiteDirectory::new(path))
            };
            (network, Url::parse(LOCAL_ORIGIN)?)
        }
    };
    debug!(origin = %origin, offline = config.offline_mode, "Site connected");
    Ok(Site { network, origin })
}

pub fn open_store(config: &Config) -> Result<FileStore> {
    Ok(FileStore::in_dir(&config.data_dir()?))
}

/// The worker over the on-disk caches, picking up an earlier install.
pub fn open_worker(config: &Config, site: &Site) -> Result<ServiceWorker<SiteNetwork>> {
    let dir = config.worker_cache_dir()?;
    let caches = CacheStorage::open(dir.clone())
        .with_context(|| format!("Failed to open worker caches at {}", dir.display()))?;
    Ok(ServiceWorker::resume(
        Arc::new(site.network.clone()),
        caches,
        WorkerConfig::default(),
        site.origin.clone(),
    ))
}
