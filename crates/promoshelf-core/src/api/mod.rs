//! Data loader for the static promotion feed.
//!
//! This module provides the `DataLoader` that fetches the catalog and FAQ
//! documents from the site. Both are plain JSON arrays served next to the
//! page; there is no authentication and no pagination on the wire.

pub mod client;
pub mod error;

pub use client::{Catalog, DataLoader, CATALOG_PATH, FAQ_PATH};
pub use error::{ApiError, LoadError};
