//! Route selection for intercepted requests.

use super::{WorkerConfig, BANNER_PATH};
use crate::net::{Destination, Method, Request};

/// How the worker handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Not intercepted; goes straight to the network.
    Passthrough,
    /// Images and banners: cached copy now, refresh in the background.
    StaleWhileRevalidate,
    /// App shell: cache first, store the network copy on a miss.
    ShellCacheFirst,
    /// Anything else: any cache, then the network.
    CacheThenNetwork,
}

pub fn classify(request: &Request, config: &WorkerConfig) -> Route {
    if request.method != Method::GET {
        return Route::Passthrough;
    }
    let path = request.path();
    if request.destination == Destination::Image || path.contains(BANNER_PATH) {
        return Route::StaleWhileRevalidate;
    }
    if is_shell_asset(path, &config.shell_assets) {
        return Route::ShellCacheFirst;
    }
    Route::CacheThenNetwork
}

/// Exact match, or for entries other than `/`, a path ending in the entry
/// (so a site served below a prefix still matches).
pub fn is_shell_asset(path: &str, shell: &[String]) -> bool {
    shell
        .iter()
        .any(|asset| path == asset || (asset != "/" && path.ends_with(asset.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn url(path: &str) -> Url {
        Url::parse("https://promo.example").unwrap().join(path).unwrap()
    }

    #[test]
    fn test_non_get_passes_through() {
        let config = WorkerConfig::default();
        let req = Request::get(url("/index.html")).with_method(Method::POST);
        assert_eq!(classify(&req, &config), Route::Passthrough);
    }

    #[test]
    fn test_images_and_banners_revalidate() {
        let config = WorkerConfig::default();
        assert_eq!(
            classify(&Request::image(url("/img/p1.webp")), &config),
            Route::StaleWhileRevalidate
        );
        assert_eq!(
            classify(&Request::get(url("/assets/banners/summer.json")), &config),
            Route::StaleWhileRevalidate
        );
        // Icons are shell assets, but an image request still takes the image route
        assert_eq!(
            classify(&Request::image(url("/assets/icons/icon-192.png")), &config),
            Route::StaleWhileRevalidate
        );
    }

    #[test]
    fn test_shell_assets() {
        let config = WorkerConfig::default();
        assert_eq!(classify(&Request::navigate(url("/")), &config), Route::ShellCacheFirst);
        assert_eq!(classify(&Request::get(url("/styles.css")), &config), Route::ShellCacheFirst);
        assert_eq!(
            classify(&Request::get(url("/site/data/promos.json")), &config),
            Route::ShellCacheFirst
        );
    }

    #[test]
    fn test_root_entry_only_matches_exactly() {
        let shell = vec!["/".to_string()];
        assert!(is_shell_asset("/", &shell));
        assert!(!is_shell_asset("/deals/", &shell));
    }

    #[test]
    fn test_other_gets() {
        let config = WorkerConfig::default();
        assert_eq!(
            classify(&Request::get(url("/data/reviews.json")), &config),
            Route::CacheThenNetwork
        );
    }
}
