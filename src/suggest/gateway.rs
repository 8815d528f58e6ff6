//! Suggestion gateway service.
//!
//! A small HTTP service that fronts the upstream chat-completion API for
//! the dashboard: it owns the provider credentials, assembles the prompt
//! from posted metrics and relays the upstream event stream back to the
//! caller as-is. The stream is piped chunk by chunk, never buffered, so
//! tokens reach the caller as the provider emits them.
//!
//! Upstream 429 and 402 pass through with a descriptive JSON body; any
//! other failure becomes a 500. CORS is fully open: the gateway itself
//! holds no user data and trusts its deployment boundary.

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::prompts;
use super::types::{ChatRequest, SuggestError, SuggestionRequest};
use crate::config::GatewaySettings;

/// Shared state for gateway handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Gateway settings, including the upstream endpoint and model
    settings: GatewaySettings,
    /// HTTP client for upstream calls
    http: reqwest::Client,
}

impl GatewayState {
    /// Build gateway state from settings.
    ///
    /// Only a connect timeout is set: the relayed stream must be allowed
    /// to live for as long as the provider keeps producing tokens.
    pub fn new(settings: GatewaySettings) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { settings, http }
    }
}

/// Build the gateway router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/youtube-suggestions", post(suggestions))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the gateway until shutdown.
pub async fn serve(settings: GatewaySettings) -> anyhow::Result<()> {
    let bind_addr = settings.bind_addr.clone();
    let state = GatewayState::new(settings);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Suggestion gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Relay a suggestion request upstream and stream the answer back.
async fn suggestions(
    State(state): State<GatewayState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Response, SuggestError> {
    info!("Generating {:?} suggestions", request.kind);

    let upstream = forward(&state, &request).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| SuggestError::Api(e.to_string()))?;

    Ok(response)
}

/// Send the chat-completion request and vet the upstream status.
async fn forward(
    state: &GatewayState,
    request: &SuggestionRequest,
) -> Result<reqwest::Response, SuggestError> {
    let messages = prompts::build_messages(request);
    let body = ChatRequest {
        model: &state.settings.model,
        messages: &messages,
        stream: true,
    };

    let mut upstream_request = state.http.post(&state.settings.upstream_url).json(&body);
    if let Some(key) = state.settings.api_key() {
        upstream_request = upstream_request.bearer_auth(key);
    }

    let response = upstream_request.send().await.map_err(|e| {
        error!("Upstream request failed: {}", e);
        if e.is_connect() || e.is_timeout() {
            SuggestError::Offline
        } else {
            SuggestError::Api(e.to_string())
        }
    })?;

    let status = response.status();
    match status.as_u16() {
        429 => Err(SuggestError::RateLimited),
        402 => Err(SuggestError::CreditsExhausted),
        _ if status.is_success() => Ok(response),
        _ => {
            let body = response.text().await.unwrap_or_default();
            error!("Upstream returned {}: {}", status, body);
            Err(SuggestError::Api(format!(
                "Upstream returned status {}",
                status
            )))
        }
    }
}

impl IntoResponse for SuggestError {
    fn into_response(self) -> Response {
        let status = match self {
            SuggestError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            SuggestError::CreditsExhausted => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_maps_to_429() {
        let response = SuggestError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_credits_exhausted_maps_to_402() {
        let response = SuggestError::CreditsExhausted.into_response();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let response = SuggestError::Api("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = SuggestError::Offline.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
