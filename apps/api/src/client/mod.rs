//! Typed consumer of the job-board REST API: one transport client plus the
//! resource services and fetch-state wrappers built on it. Nothing in the
//! server handlers uses this layer; it exists for programs (and tests) that
//! talk to the API over HTTP.

pub mod dashboard;
pub mod fetcher;
pub mod jobs;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DEFAULT_API_BASE_URL;

const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Error surfaced by every API operation. `status` is `None` for transport
/// failures (connection refused, timeout); otherwise it carries the HTTP
/// status so callers can tell a 404 from a 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn transport(e: reqwest::Error) -> Self {
        ApiError {
            status: None,
            message: e.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Normalizes a non-2xx response into an `ApiError`: a parseable JSON body
/// contributes its `message` field, an unparseable body yields the generic
/// message, and a parseable body without `message` falls back to the status.
fn error_from_response(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.unwrap_or_else(|| format!("HTTP {status}")),
        Err(_) => GENERIC_ERROR_MESSAGE.to_string(),
    };
    ApiError {
        status: Some(status),
        message,
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decodes a response expected to carry a JSON body.
fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !is_success(status) {
        return Err(error_from_response(status, body));
    }
    serde_json::from_str(body).map_err(|_| ApiError {
        status: Some(status),
        message: "Invalid JSON in response body".to_string(),
    })
}

/// Accepts any success status, including a bodiless 204.
fn expect_no_content(status: u16, body: &str) -> Result<(), ApiError> {
    if !is_success(status) {
        return Err(error_from_response(status, body));
    }
    Ok(())
}

/// The shared transport client. Every resource service routes through here
/// so base-URL resolution, header policy, and error normalization stay
/// uniform. No retries, no timeout tuning, no caching.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL from `API_BASE_URL`, falling back to the fixed default.
    pub fn from_env() -> Self {
        let base = std::env::var("API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self::new(base)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(ApiError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::transport)?;
        decode_body(status, &body)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.execute(self.http.get(self.url(endpoint))).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(endpoint)).json(body))
            .await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.put(self.url(endpoint)).json(body))
            .await
    }

    /// DELETE resolves successfully on any 2xx, including 204 No Content.
    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(endpoint))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(ApiError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::transport)?;
        expect_no_content(status, &body)
    }
}
