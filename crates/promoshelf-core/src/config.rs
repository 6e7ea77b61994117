//! Application configuration management.
//!
//! Configuration is stored at `~/.config/promoshelf/config.json`. Values in
//! the environment (`PROMOSHELF_SITE`, `PROMOSHELF_PAGE_SIZE`) win over the
//! file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::i18n::Locale;
use crate::state::DEFAULT_PAGE_SIZE;

/// Application name used for config/cache/data directory paths
const APP_NAME: &str = "promoshelf";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const SITE_ENV: &str = "PROMOSHELF_SITE";
pub const PAGE_SIZE_ENV: &str = "PROMOSHELF_PAGE_SIZE";

const DEFAULT_SITE: &str = "http://localhost:8080/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site root: an http(s) URL or a local directory.
    pub site: String,
    pub page_size: usize,
    pub locale: Locale,
    /// Open on the saved-items view.
    pub show_saved_promos: bool,
    /// Never touch the network; serve only what the cache worker holds.
    pub offline_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            locale: Locale::default(),
            show_saved_promos: false,
            offline_mode: false,
        }
    }
}

/// Where the site lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteLocation {
    Remote(Url),
    Directory(PathBuf),
}

impl SiteLocation {
    pub fn parse(site: &str) -> Result<Self> {
        if site.starts_with("http://") || site.starts_with("https://") {
            let mut url = Url::parse(site).with_context(|| format!("Invalid site URL: {}", site))?;
            // Relative data paths resolve below the site root
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Self::Remote(url))
        } else {
            Ok(Self::Directory(PathBuf::from(site)))
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply environment overrides. An unparsable page size is ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(std::env::var(SITE_ENV).ok(), std::env::var(PAGE_SIZE_ENV).ok());
    }

    fn apply_overrides(&mut self, site: Option<String>, page_size: Option<String>) {
        if let Some(site) = site.filter(|s| !s.trim().is_empty()) {
            self.site = site;
        }
        if let Some(raw) = page_size {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.page_size = n,
                _ => warn!(value = %raw, "Ignoring invalid {}", PAGE_SIZE_ENV),
            }
        }
    }

    pub fn site_location(&self) -> Result<SiteLocation> {
        SiteLocation::parse(&self.site)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Cache directory: worker caches and logs.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Data directory: the key-value store.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn worker_cache_dir(&self) -> Result<PathBuf> {
        Ok(self.cache_dir()?.join("worker"))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.cache_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.locale, Locale::Thai);
        assert!(!config.show_saved_promos);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            site: "/srv/promo".into(),
            page_size: 12,
            locale: Locale::English,
            show_saved_promos: true,
            offline_mode: true,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.site, "/srv/promo");
        assert_eq!(loaded.page_size, 12);
        assert_eq!(loaded.locale, Locale::English);
        assert!(loaded.show_saved_promos && loaded.offline_mode);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"locale": "english"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.site, DEFAULT_SITE);
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(Some("https://promo.example".into()), Some("8".into()));
        assert_eq!(config.site, "https://promo.example");
        assert_eq!(config.page_size, 8);

        config.apply_overrides(Some("  ".into()), Some("zero".into()));
        assert_eq!(config.site, "https://promo.example");
        assert_eq!(config.page_size, 8);

        config.apply_overrides(None, Some("0".into()));
        assert_eq!(config.page_size, 8);
    }

    #[test]
    fn test_site_location() {
        let remote = SiteLocation::parse("https://promo.example/site").unwrap();
        assert_eq!(
            remote,
            SiteLocation::Remote(Url::parse("https://promo.example/site/").unwrap())
        );
        assert_eq!(
            SiteLocation::parse("./public").unwrap(),
            SiteLocation::Directory(PathBuf::from("./public"))
        );
        assert!(SiteLocation::parse("https://").is_err());
    }
}
