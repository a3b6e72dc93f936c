//! Remote platform API client.
//!
//! Thin JSON-over-HTTP client used by every repository. The client is
//! cheap to clone (the HTTP pool and the bearer token are shared) and
//! carries no caching of its own: read-side caching lives entirely in
//! [`crate::cache`].

mod error;

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::config::Config;

pub use error::{ApiError, ApiResult};

/// Error payload shape used by the platform backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client bound to the platform API base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    /// Bearer token of the signed-in session, if any.
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new client from configuration.
    ///
    /// # Panics
    /// Panics if the underlying HTTP client cannot be constructed
    /// (broken TLS backend), which is unrecoverable at startup.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base: config.api_base_url.clone(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Install the bearer token for subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Drop the bearer token.
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// Fetch a resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.authorize(self.http.get(self.endpoint(path)));
        let response = request.send().await?;
        Self::parse(path, response).await
    }

    /// Fetch a resource with query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let request = self.authorize(self.http.get(self.endpoint(path)).query(query));
        let response = request.send().await?;
        Self::parse(path, response).await
    }

    /// Create a resource.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.authorize(self.http.post(self.endpoint(path)).json(body));
        let response = request.send().await?;
        Self::parse(path, response).await
    }

    /// Trigger a body-less action endpoint (e.g. joining a contest).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.authorize(self.http.post(self.endpoint(path)));
        let response = request.send().await?;
        Self::parse(path, response).await
    }

    /// Replace a resource.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.authorize(self.http.put(self.endpoint(path)).json(body));
        let response = request.send().await?;
        Self::parse(path, response).await
    }

    /// Delete a resource.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.authorize(self.http.delete(self.endpoint(path)));
        let response = request.send().await?;
        Self::ensure_success(path, response).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        // The base URL always carries a trailing slash (Config::from_env)
        // and paths never carry a leading one.
        format!("{}{}", self.base, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(path: &str, response: Response) -> ApiResult<T> {
        let response = Self::ensure_success(path, response).await?;
        Ok(response.json().await?)
    }

    async fn ensure_success(path: &str, response: Response) -> ApiResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let err = Self::error_for(path, response).await;
        warn!("API request {path} failed: {err}");
        Err(err)
    }

    async fn error_for(path: &str, response: Response) -> ApiError {
        let status = response.status();
        let message = Self::error_message(response).await;

        match status {
            StatusCode::NOT_FOUND => ApiError::not_found(path),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::validation(message)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
            status => ApiError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Best-effort extraction of the backend's error message.
    async fn error_message(response: Response) -> String {
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.message)
            .unwrap_or(body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .field("authenticated", &self.has_token())
            .finish()
    }
}
