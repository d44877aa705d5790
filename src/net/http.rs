//! Transport seam between [`ApiClient`](super::api::ApiClient) and the browser.
//!
//! Under `csr` the [`FetchTransport`] sends requests with `gloo-net`. Tests
//! substitute a scripted transport.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use futures::future::LocalBoxFuture;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One outgoing request, fully resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Value of the `Authorization` header, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }
}

/// Raw response: status plus the unread body bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (refused, DNS, CORS, offline).
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("request could not be built: {0}")]
    Request(String),
}

/// Sends a request and yields the raw response.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>>;
}

/// Browser `fetch` through `gloo-net`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[cfg(feature = "csr")]
impl Transport for FetchTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        use gloo_net::http::Request;

        Box::pin(async move {
            let builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            let mut builder = builder.header("Accept", "application/json");
            if let Some(auth) = request.authorization() {
                builder = builder.header("Authorization", &auth);
            }
            let sent = match &request.body {
                Some(body) => {
                    builder
                        .json(body)
                        .map_err(|e| TransportError::Request(e.to_string()))?
                        .send()
                        .await
                }
                None => builder.send().await,
            };
            let response = sent.map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .binary()
                .await
                .map_err(|e| TransportError::Body(e.to_string()))?;
            log::debug!("{} {} -> {status}", request.method.as_str(), request.url);
            Ok(ApiResponse { status, body })
        })
    }
}
