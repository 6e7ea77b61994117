//! HTTP transport backed by reqwest.

use std::time::Duration;

use reqwest::{header, Client};
use tracing::debug;

use super::{Network, NetworkError, Request, Response};

/// HTTP request timeout in seconds.
/// The catalog is a couple of static files, so 30s is generous.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpNetwork {
    client: Client,
}

impl HttpNetwork {
    pub fn new() -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl Network for HttpNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        debug!(method = %request.method, url = %request.url, "HTTP fetch");

        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        let mut out = Response::new(status, url, body);
        out.content_type = content_type;
        Ok(out)
    }
}
