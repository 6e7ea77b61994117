//! Named response caches.
//!
//! A `CacheStorage` holds any number of named caches, each mapping a request
//! key (URL without fragment) to a stored response. Clones share the same
//! caches, so the fetch handler and its background revalidations see each
//! other's writes.
//!
//! On disk each cache is a directory:
//!
//! ```text
//! <root>/<cache dir>/index.json   name, next body id, entries
//! <root>/<cache dir>/<id>.body    response body
//! <root>/active                    name of the shell cache last activated
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::WorkerError;
use crate::net::Response;

const INDEX_FILE: &str = "index.json";
const ACTIVE_FILE: &str = "active";

/// One stored response, with when it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub response: Response,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(key: String, response: Response) -> Self {
        Self {
            key,
            response,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    /// Short human-readable age: "just now", "5m ago", "3h ago", "2d ago".
    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexEntry {
    key: String,
    response: Response,
    body: String,
    cached_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheIndex {
    name: String,
    next_id: u64,
    entries: Vec<IndexEntry>,
}

#[derive(Debug, Default)]
struct Cache {
    next_id: u64,
    entries: BTreeMap<String, (CacheEntry, u64)>,
}

#[derive(Debug, Default)]
struct Caches {
    // Insertion order, so lookups across caches are deterministic
    order: Vec<String>,
    by_name: BTreeMap<String, Cache>,
    active: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CacheStorage {
    inner: Arc<RwLock<Caches>>,
    // Held across every disk write so an index snapshot, its write and the
    // body sweep are never interleaved with another writer's
    disk: Arc<Mutex<()>>,
    root: Option<PathBuf>,
}

impl CacheStorage {
    /// Caches that live only as long as the process.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Open (or create) a cache store rooted at `root`, loading every cache
    /// found there. A cache with an unreadable index is skipped.
    pub fn open(root: PathBuf) -> Result<Self, WorkerError> {
        std::fs::create_dir_all(&root)?;
        let mut caches = Caches::default();

        let mut dirs: Vec<PathBuf> = std::fs::read_dir(&root)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.join(INDEX_FILE).is_file())
            .collect();
        dirs.sort();

        for dir in dirs {
            match load_cache(&dir) {
                Ok((name, cache)) => {
                    debug!(cache = %name, entries = cache.entries.len(), "Loaded cache");
                    caches.order.push(name.clone());
                    caches.by_name.insert(name, cache);
                }
                Err(e) => warn!(path = %dir.display(), error = %e, "Skipping unreadable cache"),
            }
        }

        caches.active = std::fs::read_to_string(root.join(ACTIVE_FILE))
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(Self {
            inner: Arc::new(RwLock::new(caches)),
            disk: Arc::default(),
            root: Some(root),
        })
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Cache names, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.read(|c| c.order.clone())
    }

    pub fn has(&self, name: &str) -> bool {
        self.read(|c| c.by_name.contains_key(name))
    }

    /// Shell cache recorded by the last activation, if any.
    pub fn active(&self) -> Option<String> {
        self.read(|c| c.active.clone())
    }

    /// Record `name` as the activated shell cache.
    pub fn set_active(&self, name: &str) -> Result<(), WorkerError> {
        let _disk = self.lock_disk();
        self.write(|c| c.active = Some(name.to_string()));
        if let Some(root) = &self.root {
            std::fs::create_dir_all(root)?;
            std::fs::write(root.join(ACTIVE_FILE), name)?;
        }
        Ok(())
    }

    /// Create the cache if it does not exist yet.
    pub fn open_cache(&self, name: &str) -> Result<(), WorkerError> {
        let _disk = self.lock_disk();
        if self.has(name) {
            return Ok(());
        }
        self.write(|c| {
            c.order.push(name.to_string());
            c.by_name.insert(name.to_string(), Cache::default());
        });
        self.persist(name)
    }

    /// Remove a cache and everything in it. Returns whether it existed.
    pub fn delete(&self, name: &str) -> Result<bool, WorkerError> {
        let _disk = self.lock_disk();
        let existed = self.write(|c| {
            c.order.retain(|n| n != name);
            c.by_name.remove(name).is_some()
        });
        if existed {
            if let Some(dir) = self.cache_dir(name) {
                if dir.exists() {
                    std::fs::remove_dir_all(&dir)?;
                }
            }
        }
        Ok(existed)
    }

    pub fn match_in(&self, name: &str, key: &str) -> Option<Response> {
        self.read(|c| {
            c.by_name
                .get(name)
                .and_then(|cache| cache.entries.get(key))
                .map(|(entry, _)| entry.response.clone())
        })
    }

    /// First match across every cache, oldest cache first.
    pub fn match_any(&self, key: &str) -> Option<Response> {
        self.read(|c| {
            c.order.iter().find_map(|name| {
                c.by_name
                    .get(name)
                    .and_then(|cache| cache.entries.get(key))
                    .map(|(entry, _)| entry.response.clone())
            })
        })
    }

    /// Store one response, replacing any previous one under `key`.
    pub fn put(&self, name: &str, key: &str, response: Response) -> Result<(), WorkerError> {
        self.put_all(name, vec![(key.to_string(), response)])
    }

    /// Store several responses in one write. The cache is created if needed.
    pub fn put_all(&self, name: &str, items: Vec<(String, Response)>) -> Result<(), WorkerError> {
        let _disk = self.lock_disk();
        let written = self.write(|c| {
            if !c.by_name.contains_key(name) {
                c.order.push(name.to_string());
            }
            let cache = c.by_name.entry(name.to_string()).or_default();
            let mut written = Vec::with_capacity(items.len());
            for (key, response) in items {
                let id = cache.next_id;
                cache.next_id += 1;
                written.push((id, response.body.clone()));
                cache.entries.insert(key.clone(), (CacheEntry::new(key, response), id));
            }
            written
        });

        if let Some(dir) = self.cache_dir(name) {
            std::fs::create_dir_all(&dir)?;
            for (id, body) in written {
                std::fs::write(dir.join(body_file(id)), body)?;
            }
        }
        self.persist(name)
    }

    /// Entries of one cache, sorted by key.
    pub fn entries(&self, name: &str) -> Vec<CacheEntry> {
        self.read(|c| {
            c.by_name
                .get(name)
                .map(|cache| cache.entries.values().map(|(e, _)| e.clone()).collect())
                .unwrap_or_default()
        })
    }

    fn read<T>(&self, f: impl FnOnce(&Caches) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Caches) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    fn lock_disk(&self) -> MutexGuard<'_, ()> {
        self.disk.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache_dir(&self, name: &str) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(dir_name(name)))
    }

    /// Rewrite the index of `name` and drop body files no entry points to.
    /// Callers hold the disk lock.
    fn persist(&self, name: &str) -> Result<(), WorkerError> {
        let Some(dir) = self.cache_dir(name) else { return Ok(()) };

        let index = self.read(|c| {
            c.by_name.get(name).map(|cache| CacheIndex {
                name: name.to_string(),
                next_id: cache.next_id,
                entries: cache
                    .entries
                    .values()
                    .map(|(entry, id)| IndexEntry {
                        key: entry.key.clone(),
                        response: entry.response.clone(),
                        body: body_file(*id),
                        cached_at: entry.cached_at,
                    })
                    .collect(),
            })
        });
        let Some(index) = index else { return Ok(()) };

        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(INDEX_FILE), serde_json::to_string_pretty(&index)?)?;

        for file in std::fs::read_dir(&dir)?.filter_map(|e| e.ok()) {
            let file_name = file.file_name().to_string_lossy().into_owned();
            if file_name.ends_with(".body") && !index.entries.iter().any(|e| e.body == file_name) {
                if let Err(e) = std::fs::remove_file(file.path()) {
                    warn!(file = %file_name, error = %e, "Failed to remove stale body");
                }
            }
        }
        Ok(())
    }
}

fn body_file(id: u64) -> String {
    format!("{}.body", id)
}

/// Directory name for a cache name; anything outside `[A-Za-z0-9._-]` is replaced.
fn dir_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

fn load_cache(dir: &Path) -> Result<(String, Cache), WorkerError> {
    let contents = std::fs::read_to_string(dir.join(INDEX_FILE))?;
    let index: CacheIndex = serde_json::from_str(&contents)?;

    let mut cache = Cache {
        next_id: index.next_id,
        entries: BTreeMap::new(),
    };
    for item in index.entries {
        let Some(id) = item.body.strip_suffix(".body").and_then(|s| s.parse::<u64>().ok()) else {
            warn!(body = %item.body, "Ignoring entry with malformed body name");
            continue;
        };
        let body = match std::fs::read(dir.join(&item.body)) {
            Ok(body) => body,
            Err(e) => {
                warn!(key = %item.key, error = %e, "Dropping entry with missing body");
                continue;
            }
        };
        let mut response = item.response;
        response.body = body;
        cache.next_id = cache.next_id.max(id + 1);
        cache.entries.insert(
            item.key.clone(),
            (
                CacheEntry {
                    key: item.key,
                    response,
                    cached_at: item.cached_at,
                },
                id,
            ),
        );
    }
    Ok((index.name, cache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ok(body: &str) -> Response {
        Response::new(200, "https://promo.example/x", body.as_bytes().to_vec())
            .with_content_type("text/plain")
    }

    #[test]
    fn test_memory_put_and_match() {
        let caches = CacheStorage::memory();
        caches.put("a", "k1", ok("one")).unwrap();
        caches.put("b", "k1", ok("two")).unwrap();

        assert_eq!(caches.keys(), vec!["a", "b"]);
        assert_eq!(caches.match_in("b", "k1").unwrap().text(), "two");
        // Oldest cache wins across caches
        assert_eq!(caches.match_any("k1").unwrap().text(), "one");
        assert!(caches.match_any("missing").is_none());
    }

    #[test]
    fn test_put_replaces_entry() {
        let caches = CacheStorage::memory();
        caches.put("a", "k", ok("old")).unwrap();
        caches.put("a", "k", ok("new")).unwrap();
        assert_eq!(caches.entries("a").len(), 1);
        assert_eq!(caches.match_in("a", "k").unwrap().text(), "new");
    }

    #[test]
    fn test_clones_share_state() {
        let caches = CacheStorage::memory();
        let other = caches.clone();
        other.put("a", "k", ok("shared")).unwrap();
        assert!(caches.match_in("a", "k").is_some());
    }

    #[test]
    fn test_delete() {
        let caches = CacheStorage::memory();
        caches.open_cache("old").unwrap();
        assert!(caches.delete("old").unwrap());
        assert!(!caches.delete("old").unwrap());
        assert!(caches.keys().is_empty());
    }

    #[test]
    fn test_disk_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        {
            let caches = CacheStorage::open(dir.path().to_path_buf()).unwrap();
            caches.put("shell/v1", "https://promo.example/", ok("<html>")).unwrap();
            caches.put("shell/v1", "https://promo.example/", ok("<html>v2")).unwrap();
            caches.put("runtime", "https://promo.example/a.png", ok("png")).unwrap();
        }

        let caches = CacheStorage::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(caches.keys().len(), 2);
        assert!(caches.has("shell/v1"));
        let resp = caches.match_in("shell/v1", "https://promo.example/").unwrap();
        assert_eq!(resp.text(), "<html>v2");
        assert_eq!(resp.content_type.as_deref(), Some("text/plain"));

        // Replaced body file was cleaned up
        let bodies = std::fs::read_dir(dir.path().join("shell_v1"))
            .unwrap()
            .filter(|e| e.as_ref().unwrap().file_name().to_string_lossy().ends_with(".body"))
            .count();
        assert_eq!(bodies, 1);
    }

    #[test]
    fn test_disk_delete_removes_directory() {
        let dir = tempfile::tempdir().unwrap();
        let caches = CacheStorage::open(dir.path().to_path_buf()).unwrap();
        caches.put("old-v0", "k", ok("x")).unwrap();
        assert!(dir.path().join("old-v0").exists());

        caches.delete("old-v0").unwrap();
        assert!(!dir.path().join("old-v0").exists());
        assert!(!CacheStorage::open(dir.path().to_path_buf()).unwrap().has("old-v0"));
    }

    #[test]
    fn test_concurrent_puts_keep_every_body() {
        let dir = tempfile::tempdir().unwrap();
        let caches = CacheStorage::open(dir.path().to_path_buf()).unwrap();

        std::thread::scope(|s| {
            for worker in 0..4 {
                let caches = caches.clone();
                s.spawn(move || {
                    for i in 0..25 {
                        let key = format!("https://promo.example/banner-{}-{}.webp", worker, i);
                        caches.put("runtime", &key, ok(&key)).unwrap();
                    }
                });
            }
        });

        let reopened = CacheStorage::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.entries("runtime").len(), 100);
        for worker in 0..4 {
            for i in 0..25 {
                let key = format!("https://promo.example/banner-{}-{}.webp", worker, i);
                assert_eq!(reopened.match_in("runtime", &key).unwrap().text(), key);
            }
        }
    }

    #[test]
    fn test_active_marker_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let caches = CacheStorage::open(dir.path().to_path_buf()).unwrap();
            assert!(caches.active().is_none());
            caches.set_active("shell-v1").unwrap();
        }

        let caches = CacheStorage::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(caches.active().as_deref(), Some("shell-v1"));
        // The marker is not mistaken for a cache
        assert!(caches.keys().is_empty());
    }

    #[test]
    fn test_corrupt_index_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("broken")).unwrap();
        std::fs::write(dir.path().join("broken").join(INDEX_FILE), "{not json").unwrap();

        let caches = CacheStorage::open(dir.path().to_path_buf()).unwrap();
        assert!(caches.keys().is_empty());
    }

    #[test]
    fn test_age_display() {
        let mut entry = CacheEntry::new("k".into(), ok("x"));
        assert_eq!(entry.age_display(), "just now");

        entry.cached_at = Utc::now() - Duration::minutes(5);
        assert_eq!(entry.age_display(), "5m ago");

        entry.cached_at = Utc::now() - Duration::hours(3);
        assert_eq!(entry.age_display(), "3h ago");

        entry.cached_at = Utc::now() - Duration::days(2);
        assert_eq!(entry.age_display(), "2d ago");

        entry.cached_at = Utc::now() + Duration::minutes(10);
        assert_eq!(entry.age_display(), "just now");
    }
}
