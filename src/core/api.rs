//! REST client for the operations backend
//!
//! Wraps a blocking `reqwest` client. Every record collection is served under
//! `<api_url>/<collection>`; responses are either the bare JSON document or
//! an envelope `{ "data": ... }`.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::config::Config;
use crate::core::entity::Record;
use crate::core::stats::LocationCounts;
use crate::entities::Project;

/// Errors that can occur while talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not build HTTP client: {0}")]
    Client(String),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

impl ApiError {
    /// True for 404 responses
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// The persistence seam used by edit sessions
pub trait ProjectStore {
    /// Load the canonical project record
    fn fetch_project(&self, id: &str) -> Result<Project, ApiError>;

    /// Submit a normalized payload; returns the updated record
    fn update_project(&self, id: &str, payload: &Value) -> Result<Project, ApiError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Blocking HTTP client for the backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            config.api_url(),
            config.api_token.clone(),
            Some(Duration::from_secs(config.timeout_secs())),
        )
    }

    /// Base URL all paths are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T, ApiError> {
        let response = request.send().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        Self::handle_response(response, url)
    }

    fn handle_response<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(%url, status = status.as_u16(), bytes = text.len(), "response received");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&text, status.canonical_reason()),
            });
        }

        serde_json::from_str::<Envelope<T>>(&text)
            .map(Envelope::into_inner)
            .map_err(|e| ApiError::InvalidResponse {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    /// GET a JSON document
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        self.send(self.request(Method::GET, &url), &url)
    }

    /// PUT a JSON body, returning the response document
    pub fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        self.send(self.request(Method::PUT, &url).json(body), &url)
    }

    /// List every record of a collection
    pub fn list<T: Record>(&self) -> Result<Vec<T>, ApiError> {
        self.get(T::COLLECTION)
    }

    /// Fetch one record by id
    pub fn fetch<T: Record>(&self, id: &str) -> Result<T, ApiError> {
        self.get(&format!("{}/{}", T::COLLECTION, id))
    }

    /// Pre-aggregated location counts
    pub fn location_counts(&self) -> Result<LocationCounts, ApiError> {
        self.get("locations/stats")
    }
}

impl ProjectStore for ApiClient {
    fn fetch_project(&self, id: &str) -> Result<Project, ApiError> {
        self.fetch::<Project>(id)
    }

    fn update_project(&self, id: &str, payload: &Value) -> Result<Project, ApiError> {
        self.put(&format!("{}/{}", Project::COLLECTION, id), payload)
    }
}

/// Pull a readable message out of an error body
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(Value::Object(doc)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(msg)) = doc.get(key) {
                return msg.clone();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        reason.unwrap_or("request failed").to_string()
    } else {
        body.to_string()
    }
}
