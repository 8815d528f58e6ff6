//! Low-level REST client for the hosted tables and storage buckets.
//!
//! The backend exposes each table at `/rest/v1/{table}` with filters in
//! the query string (`column=eq.value`, `order=column.desc`, `limit=n`)
//! and write behavior selected via the `Prefer` header. Storage objects
//! live under `/storage/v1/object/{bucket}/{path}`. Every request carries
//! the publishable `apikey`; the bearer token is the signed-in user's
//! access token so row-level security applies, falling back to the
//! publishable key when nobody is signed in.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use super::types::BackendError;
use crate::config::BackendSettings;

/// Query-string builder for table reads and row targeting.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Equality filters as `(column, eq.value)` pairs
    filters: Vec<(String, String)>,
    /// Ordering, as `column.asc` / `column.desc`
    order: Option<String>,
    /// Row cap
    limit: Option<u32>,
}

impl Query {
    /// Start an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows where `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Sort descending by `column`.
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(format!("{}.desc", column));
        self
    }

    /// Sort ascending by `column`.
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(format!("{}.asc", column));
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Render into query-string pairs.
    fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        pairs.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Client for the hosted data plane.
///
/// Cheap to share behind an `Arc`; the access token swaps in and out as
/// sessions come and go.
pub struct BackendClient {
    /// HTTP client
    http: reqwest::Client,
    /// Base URL of the backend project
    base_url: String,
    /// Publishable API key
    anon_key: String,
    /// Signed-in user's access token, when present
    access_token: Arc<RwLock<Option<String>>>,
}

impl BackendClient {
    /// Create a client from backend settings.
    pub fn from_settings(settings: &BackendSettings) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: settings.base_url.clone(),
            anon_key: settings.anon_key.clone(),
            access_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a client with explicit URL and key.
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self::from_settings(&BackendSettings {
            base_url,
            anon_key,
            request_timeout_secs: 30,
        })
    }

    /// Install the signed-in user's access token.
    pub async fn set_access_token(&self, token: String) {
        *self.access_token.write().await = Some(token);
    }

    /// Drop the access token on sign-out.
    pub async fn clear_access_token(&self) {
        *self.access_token.write().await = None;
    }

    /// Read rows from a table.
    pub async fn select<R: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<R>, BackendError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let request = self.http.get(&url).query(&query.to_pairs());
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| BackendError::SerializationError(e.to_string()))
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Insert one row, returning the stored representation.
    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<R, BackendError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let request = self
            .http
            .post(&url)
            .header("Prefer", "return=representation")
            .json(row);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            let rows: Vec<R> = response
                .json()
                .await
                .map_err(|e| BackendError::SerializationError(e.to_string()))?;
            rows.into_iter().next().ok_or(BackendError::NotFound)
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Insert or overwrite on the given conflict key.
    ///
    /// `on_conflict` names the unique columns, e.g. `user_id,date,platform`.
    pub async fn upsert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &T,
    ) -> Result<R, BackendError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let request = self
            .http
            .post(&url)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            let rows: Vec<R> = response
                .json()
                .await
                .map_err(|e| BackendError::SerializationError(e.to_string()))?;
            rows.into_iter().next().ok_or(BackendError::NotFound)
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Patch rows matched by the query, returning updated rows.
    pub async fn update<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        patch: &T,
    ) -> Result<Vec<R>, BackendError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let request = self
            .http
            .patch(&url)
            .query(&query.to_pairs())
            .header("Prefer", "return=representation")
            .json(patch);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| BackendError::SerializationError(e.to_string()))
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Delete rows matched by the query.
    ///
    /// Matching zero rows is reported as `NotFound`.
    pub async fn delete(&self, table: &str, query: &Query) -> Result<(), BackendError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let request = self
            .http
            .delete(&url)
            .query(&query.to_pairs())
            .header("Prefer", "return=representation");
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            let rows: Vec<serde_json::Value> = response
                .json()
                .await
                .map_err(|e| BackendError::SerializationError(e.to_string()))?;
            if rows.is_empty() {
                Err(BackendError::NotFound)
            } else {
                Ok(())
            }
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Upload an object, overwriting any previous version, and return its
    /// public URL.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BackendError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let request = self
            .http
            .post(&url)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(self.public_object_url(bucket, path))
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    /// Public URL for an object in a public bucket.
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    /// Attach `apikey` and bearer headers.
    async fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self.access_token.read().await;
        let bearer = token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    /// Turn a non-success response into a backend error.
    async fn error_from_response(&self, response: reqwest::Response) -> BackendError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error_from_status(status, &body)
    }
}

/// Map transport-level failures onto backend errors.
fn map_transport_error(e: reqwest::Error) -> BackendError {
    if e.is_connect() || e.is_timeout() {
        BackendError::Offline
    } else {
        BackendError::Api(e.to_string())
    }
}

/// Map a non-success status plus body onto a backend error.
fn error_from_status(status: reqwest::StatusCode, body: &str) -> BackendError {
    match status.as_u16() {
        401 | 403 => BackendError::Forbidden(parse_error_message(body, status)),
        404 => BackendError::NotFound,
        409 => BackendError::Conflict(parse_error_message(body, status)),
        429 => BackendError::RateLimited,
        500..=599 => BackendError::Offline,
        _ => BackendError::Api(parse_error_message(body, status)),
    }
}

/// Pull a human-readable message out of an error body.
fn parse_error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg", "error", "hint"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    format!("Backend returned status {}", status)
}
