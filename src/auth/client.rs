//! HTTP client for the hosted auth endpoints.
//!
//! Speaks the conventional REST dialect of the backing platform:
//! `POST /auth/v1/signup`, `POST /auth/v1/token?grant_type=...`,
//! `POST /auth/v1/logout` and `GET /auth/v1/user`. Every request carries
//! the publishable `apikey` header; token-scoped calls add a bearer token.

use std::time::Duration;

use serde::Serialize;

use super::types::{AuthError, AuthSession, AuthUser};
use crate::config::BackendSettings;

/// Credentials payload for signup and password grant.
#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Refresh grant payload.
#[derive(Debug, Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Client for the auth server.
pub struct AuthClient {
    /// HTTP client
    http: reqwest::Client,
    /// Base URL of the backend project
    base_url: String,
    /// Publishable API key
    anon_key: String,
}

impl AuthClient {
    /// Create a new auth client.
    pub fn new(base_url: String, anon_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url,
            anon_key,
        }
    }

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
        }
    }

    /// Register a new account with email and password.
    ///
    /// Returns a live session when the project signs users in on signup.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AuthError::SerializationError(e.to_string()))
        } else {
            Err(error_from_status(status, &response.text().await.unwrap_or_default()))
        }
    }

    /// Exchange email and password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AuthError::SerializationError(e.to_string()))
        } else if status.as_u16() == 400 {
            // Password grant rejections come back as 400 invalid_grant
            Err(AuthError::InvalidCredentials)
        } else {
            Err(error_from_status(status, &response.text().await.unwrap_or_default()))
        }
    }

    /// Mint a fresh session from a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let url = format!("{}/auth/v1/token?grant_type=refresh_token", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&RefreshGrant { refresh_token })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AuthError::SerializationError(e.to_string()))
        } else if status.as_u16() == 400 || status.as_u16() == 401 {
            Err(AuthError::SessionExpired)
        } else {
            Err(error_from_status(status, &response.text().await.unwrap_or_default()))
        }
    }

    /// Revoke the session server-side.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() || status.as_u16() == 401 {
            // An already-dead token is as signed out as we need
            Ok(())
        } else {
            Err(error_from_status(status, &response.text().await.unwrap_or_default()))
        }
    }

    /// Fetch the user behind an access token.
    ///
    /// Used to validate a restored session before trusting it.
    pub async fn fetch_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| AuthError::SerializationError(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(AuthError::SessionExpired)
        } else {
            Err(error_from_status(status, &response.text().await.unwrap_or_default()))
        }
    }
}

/// Map transport-level failures onto auth errors.
fn map_transport_error(e: reqwest::Error) -> AuthError {
    if e.is_connect() || e.is_timeout() {
        AuthError::Offline
    } else {
        AuthError::Api(e.to_string())
    }
}

/// Map a non-success status plus body onto an auth error.
fn error_from_status(status: reqwest::StatusCode, body: &str) -> AuthError {
    match status.as_u16() {
        429 => AuthError::RateLimited,
        500..=599 => AuthError::Offline,
        _ => AuthError::Api(parse_error_message(body, status)),
    }
}

/// Pull a human-readable message out of an auth error body.
///
/// The server answers with one of several shapes (`msg`,
/// `error_description`, `message`); fall back to the raw status.
fn parse_error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["msg", "error_description", "message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    format!("Auth server returned status {}", status)
}
