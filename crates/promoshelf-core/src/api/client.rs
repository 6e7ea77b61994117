//! Fetches the catalog and FAQ documents.
//!
//! The two requests run concurrently. Either one failing, at the transport
//! level, with an HTTP error status, or with a body that does not parse,
//! aborts the whole load: callers never see a half-populated catalog.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::models::{FaqEntry, Promotion};
use crate::net::{resolve, Network, Request, Response};

use super::{ApiError, LoadError};

/// Catalog document, relative to the site base.
pub const CATALOG_PATH: &str = "data/promos.json";

/// FAQ document, relative to the site base.
pub const FAQ_PATH: &str = "data/faq.json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub promos: Vec<Promotion>,
    pub faq: Vec<FaqEntry>,
}

pub struct DataLoader<'a, N> {
    network: &'a N,
    base: Url,
}

impl<'a, N: Network> DataLoader<'a, N> {
    pub fn new(network: &'a N, base: Url) -> Self {
        Self { network, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Load both documents. No retry: a failure here is fatal to startup.
    pub async fn load(&self) -> Result<Catalog, LoadError> {
        let (promos_resp, faq_resp) = futures::try_join!(
            self.fetch("catalog", CATALOG_PATH),
            self.fetch("FAQ", FAQ_PATH),
        )?;

        let promos: Vec<Promotion> = Self::parse("catalog", &promos_resp)?;
        let faq: Vec<FaqEntry> = Self::parse("FAQ", &faq_resp)?;

        info!(promos = promos.len(), faq = faq.len(), "Catalog loaded");
        Ok(Catalog { promos, faq })
    }

    async fn fetch(&self, resource: &'static str, path: &str) -> Result<Response, LoadError> {
        let to_fetch_error = |source: ApiError| LoadError::Fetch { resource, source };

        let url = resolve(&self.base, path).map_err(|e| to_fetch_error(e.into()))?;
        debug!(%url, resource, "Fetching");

        let response = self
            .network
            .fetch(&Request::get(url))
            .await
            .map_err(|e| to_fetch_error(e.into()))?;

        if !response.is_success() {
            return Err(to_fetch_error(ApiError::from_status(
                response.status,
                &response.text(),
            )));
        }
        Ok(response)
    }

    fn parse<T: DeserializeOwned>(resource: &'static str, response: &Response) -> Result<T, LoadError> {
        serde_json::from_slice(&response.body).map_err(|source| LoadError::Parse { resource, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{NetworkError, OfflineNetwork};
    use std::collections::HashMap;

    /// Serves fixed bodies keyed by URL path.
    struct FakeNetwork {
        routes: HashMap<&'static str, (u16, &'static str)>,
    }

    impl Network for FakeNetwork {
        async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
            match self.routes.get(request.path()) {
                Some((status, body)) => Ok(Response::new(
                    *status,
                    request.url.to_string(),
                    body.as_bytes().to_vec(),
                )),
                None => Ok(Response::new(404, request.url.to_string(), Vec::new())),
            }
        }
    }

    fn base() -> Url {
        Url::parse("https://promo.example/").unwrap()
    }

    const PROMOS: &str = r#"[
        {"id": "a", "title": "Coffee deal", "image": "a.webp", "link": "https://a", "tag": ["food"]},
        {"id": "b", "title": "Flight sale", "image": "b.webp", "link": "https://b"}
    ]"#;
    const FAQ: &str = r#"[{"q": "Q1", "a": "A1"}]"#;

    #[tokio::test]
    async fn test_load_success() {
        let network = FakeNetwork {
            routes: HashMap::from([
                ("/data/promos.json", (200, PROMOS)),
                ("/data/faq.json", (200, FAQ)),
            ]),
        };
        let catalog = DataLoader::new(&network, base()).load().await.unwrap();
        assert_eq!(catalog.promos.len(), 2);
        assert_eq!(catalog.promos[0].id, "a");
        assert_eq!(catalog.faq[0].answer, "A1");
    }

    #[tokio::test]
    async fn test_load_fails_when_faq_missing() {
        let network = FakeNetwork {
            routes: HashMap::from([("/data/promos.json", (200, PROMOS))]),
        };
        let err = DataLoader::new(&network, base()).load().await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Fetch { resource: "FAQ", source: ApiError::NotFound(_) }
        ));
    }

    #[tokio::test]
    async fn test_load_fails_on_bad_json() {
        let network = FakeNetwork {
            routes: HashMap::from([
                ("/data/promos.json", (200, "{not json")),
                ("/data/faq.json", (200, FAQ)),
            ]),
        };
        let err = DataLoader::new(&network, base()).load().await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { resource: "catalog", .. }));
    }

    #[tokio::test]
    async fn test_load_fails_offline() {
        let err = DataLoader::new(&OfflineNetwork, base()).load().await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Fetch { source: ApiError::NetworkError(NetworkError::Offline), .. }
        ));
    }
}
