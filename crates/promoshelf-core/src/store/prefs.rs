use tracing::warn;

use super::{KeyValueStore, StoreError};

pub const THEME_KEY: &str = "theme";

/// The persisted theme name, if the user picked a non-default one.
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    match store.get(THEME_KEY) {
        Ok(theme) => theme.filter(|t| !t.is_empty()),
        Err(e) => {
            warn!(error = %e, "Failed to read theme");
            None
        }
    }
}

/// Persist `theme`, or forget it when going back to the default.
pub fn save_theme<S: KeyValueStore + ?Sized>(store: &mut S, theme: Option<&str>) -> Result<(), StoreError> {
    match theme {
        Some(name) => store.set(THEME_KEY, name),
        None => store.remove(THEME_KEY),
    }
}
