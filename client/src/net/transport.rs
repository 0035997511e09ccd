//! HTTP transport seam for the backend clients.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and tests: `OfflineTransport` fails every call with
//! `BackendError::Unavailable`; tests substitute their own `Transport`.
//!
//! DESIGN
//! ======
//! Requests are plain values (`ApiRequest`) so URL, header and body
//! construction is testable without a browser. Responses are buffered into
//! `ApiResponse` before any decoding.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::BackendError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully built HTTP request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    /// Set a header, replacing any earlier value with the same name.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self.header("Content-Type", "application/json")
    }

    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Buffered response: status plus raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into a `BackendError`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] carrying the backend's message.
    pub fn error_for_status(self) -> Result<Self, BackendError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(BackendError::from_response(self.status, &self.body))
        }
    }

    /// # Errors
    ///
    /// Returns [`BackendError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BackendError> {
        serde_json::from_str(&self.body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, BackendError>;
}

/// Transport used where no browser networking exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

#[async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, BackendError> {
        Err(BackendError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, BackendError> {
        use gloo_net::http::{Method as HttpMethod, RequestBuilder};

        let network = |e: gloo_net::Error| BackendError::Network(e.to_string());
        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Patch => HttpMethod::PATCH,
            Method::Delete => HttpMethod::DELETE,
        };
        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let built = match &request.body {
            Some(body) => builder.json(body).map_err(network)?,
            None => builder.build().map_err(network)?,
        };
        let resp = built.send().await.map_err(network)?;
        let status = resp.status();
        let body = resp.text().await.map_err(network)?;
        Ok(ApiResponse { status, body })
    }
}

/// The transport matching the current build: browser HTTP or offline.
#[must_use]
pub fn default_transport() -> Arc<dyn Transport> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(BrowserTransport)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(OfflineTransport)
    }
}
