//! The saved-set: promotion ids the user bookmarked.
//!
//! Nothing here caches. Every call reads the `saved` entry from the store,
//! so a toggle made elsewhere (another handle, another process) is always
//! visible on the next read.

use tracing::warn;

use super::{KeyValueStore, StoreError};

pub const SAVED_KEY: &str = "saved";

/// Saved ids in the order they were added.
///
/// A missing, corrupt or unreadable entry reads as an empty list.
pub fn saved_ids<S: KeyValueStore + ?Sized>(store: &S) -> Vec<String> {
    let raw = match store.get(SAVED_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read saved list");
            return Vec::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Saved list is corrupt, treating as empty");
        Vec::new()
    })
}

pub fn is_saved<S: KeyValueStore + ?Sized>(store: &S, id: &str) -> bool {
    saved_ids(store).iter().any(|s| s == id)
}

/// Add `id` if absent, remove it if present. Returns the new membership.
pub fn toggle_saved<S: KeyValueStore + ?Sized>(store: &mut S, id: &str) -> Result<bool, StoreError> {
    let mut saved = saved_ids(store);
    let now_saved = match saved.iter().position(|s| s == id) {
        Some(idx) => {
            saved.remove(idx);
            false
        }
        None => {
            saved.push(id.to_string());
            true
        }
    };
    store.set(SAVED_KEY, &serde_json::to_string(&saved)?)?;
    Ok(now_saved)
}

pub fn clear_saved<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(SAVED_KEY)
}
