//! Promoshelf Core - shared library for the promotion browser.
//!
//! This crate provides:
//! - Catalog and FAQ loading (`api`) over a pluggable `net::Network`
//! - Filtering and pagination (`filter`)
//! - The page model, rendering and event dispatch (`dom`, `render`, `dispatch`)
//! - Saved items and preferences in a key-value store (`store`)
//! - The offline cache worker (`worker`)
//! - Configuration (`config`)

pub mod api;
pub mod config;
pub mod dispatch;
pub mod dom;
pub mod filter;
pub mod i18n;
pub mod models;
pub mod net;
pub mod platform;
pub mod render;
pub mod state;
pub mod store;
pub mod worker;

pub use api::{Catalog, DataLoader, LoadError};
pub use config::{Config, SiteLocation};
pub use dispatch::{Page, UiEvent};
pub use filter::TagFilter;
pub use i18n::Locale;
pub use models::{FaqEntry, Promotion};
pub use state::AppState;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use worker::{ServiceWorker, WorkerConfig};
