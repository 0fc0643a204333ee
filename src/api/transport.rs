//! HTTP transport abstraction.
//!
//! [`ApiClient`](super::ApiClient) speaks to the API through the [`Transport`]
//! trait. [`ReqwestTransport`] is the real implementation; tests substitute an
//! in-memory transport that records requests and replays canned responses.

use super::endpoints::Method;
use crate::domain::error::{FolioError, Result};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// A request ready to be sent, relative to the API origin.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends requests to the bookshop API.
pub trait Transport: Send + Sync {
    /// Sends one request and returns whatever status the server answered.
    ///
    /// Non-2xx statuses are *not* errors at this layer.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Network`] when no response was received.
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] for an origin that is not http(s), or
    /// [`FolioError::Network`] if the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FolioError::Config(format!(
                "api_base must start with http:// or https://, got {base_url:?}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.into(), url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        }
    }
}
