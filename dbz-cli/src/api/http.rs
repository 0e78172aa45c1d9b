//! HTTP transport seam for the query builders
//!
//! The builders only talk to [`HttpClient`]; [`ReqwestHttpClient`] is the
//! production implementation. Errors from the transport are returned unchanged,
//! with no retries and no status translation.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::Duration;

use super::constants::headers;

/// Ordered list of request headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders(Vec<(String, String)>);

impl RequestHeaders {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Standard headers for an authenticated JSON request:
    /// `Authorization: Bearer <token>` and `Content-Type: application/json`
    pub fn bearer(token: &str) -> Self {
        let mut h = Self::new();
        h.insert(headers::AUTHORIZATION, format!("Bearer {}", token));
        h.insert(headers::CONTENT_TYPE, headers::APPLICATION_JSON);
        h
    }

    /// Set a header, replacing any existing value with the same (case-insensitive) name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .0
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A completed HTTP exchange: status code plus the parsed JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed response body (`Value::Null` for an empty body)
    pub data: Value,
}

/// Minimal transport contract the query builders depend on
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &RequestHeaders) -> Result<HttpResponse>;

    async fn post(&self, url: &str, body: &Value, headers: &RequestHeaders)
    -> Result<HttpResponse>;
}

/// [`HttpClient`] backed by `reqwest`
///
/// Relative URLs such as `/api/dbz/v1/oql/execute` are resolved against the
/// configured origin. Absolute URLs are used as given.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    origin: Option<String>,
}

impl ReqwestHttpClient {
    /// Create a client with default reqwest settings for the given origin
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), Some(origin.into()))
    }

    /// Wrap an existing reqwest client (e.g. one with proxies or custom TLS)
    pub fn with_client(client: reqwest::Client, origin: Option<String>) -> Self {
        Self { client, origin }
    }

    /// Build a client with a request timeout
    pub fn with_timeout(origin: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, origin))
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Resolve `url` against the origin unless it is already absolute
    pub fn resolve_url(&self, url: &str) -> Result<String> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Ok(url.to_string());
        }

        let origin = self.origin.as_deref().ok_or_else(|| {
            anyhow::anyhow!("Cannot resolve relative URL '{}' without an API origin", url)
        })?;

        let origin = origin.trim_end_matches('/');
        if url.starts_with('/') {
            Ok(format!("{}{}", origin, url))
        } else {
            Ok(format!("{}/{}", origin, url))
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        headers: &RequestHeaders,
    ) -> Result<HttpResponse> {
        let request = headers
            .iter()
            .fold(request, |req, (name, value)| req.header(name, value));

        let response = request.send().await?.error_for_status()?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(HttpResponse { status, data })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &RequestHeaders) -> Result<HttpResponse> {
        let url = self.resolve_url(url)?;
        debug!("GET {}", url);
        self.send(self.client.get(&url), headers).await
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &RequestHeaders,
    ) -> Result<HttpResponse> {
        let url = self.resolve_url(url)?;
        debug!("POST {}", url);
        self.send(self.client.post(&url).json(body), headers).await
    }
}
