//! Client for the suggestion gateway.
//!
//! Posts metrics to the gateway and walks the relayed event stream,
//! yielding content tokens as they arrive.

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tracing::debug;

use super::types::{SuggestError, SuggestionRequest};

/// One parsed chunk of an event stream.
#[derive(Debug, Deserialize)]
struct ChatChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// What one event-stream line amounts to.
#[derive(Debug, PartialEq)]
enum SseLine {
    /// A content token to deliver
    Token(String),
    /// End-of-stream marker
    Done,
    /// Comment, keep-alive, empty delta or unparseable line
    Skip,
}

/// Classify one line of an event stream.
fn parse_sse_line(line: &str) -> SseLine {
    let Some(data) = line.strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let data = data.trim_start();

    if data == "[DONE]" {
        return SseLine::Done;
    }

    match serde_json::from_str::<ChatChunk>(data) {
        Ok(chunk) => {
            let content = chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content);
            match content {
                Some(token) if !token.is_empty() => SseLine::Token(token),
                _ => SseLine::Skip,
            }
        }
        Err(e) => {
            debug!("Skipping unparseable stream line: {}", e);
            SseLine::Skip
        }
    }
}

/// A live token stream from the gateway.
pub struct SuggestionStream {
    /// Raw byte stream from the gateway
    inner: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>,
    /// Bytes received but not yet consumed as full lines. Kept as bytes
    /// because a chunk boundary can split a multibyte character
    buffer: Vec<u8>,
    /// Whether the `[DONE]` marker has been seen
    done: bool,
}

impl SuggestionStream {
    fn new(response: reqwest::Response) -> Self {
        Self {
            inner: Box::pin(response.bytes_stream()),
            buffer: Vec::new(),
            done: false,
        }
    }

    /// Next content token, or `None` when the stream is finished.
    pub async fn next_token(&mut self) -> Option<Result<String, SuggestError>> {
        loop {
            while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = self.buffer.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line);
                match parse_sse_line(line.trim_end()) {
                    SseLine::Token(token) => return Some(Ok(token)),
                    SseLine::Done => {
                        // Nothing after the marker counts
                        self.done = true;
                        self.buffer.clear();
                        return None;
                    }
                    SseLine::Skip => {}
                }
            }

            if self.done {
                return None;
            }

            match self.inner.next().await {
                Some(Ok(bytes)) => {
                    self.buffer.extend_from_slice(&bytes);
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(SuggestError::Api(e.to_string())));
                }
                None => {
                    // The final line may arrive without a trailing newline
                    self.done = true;
                    let line: Vec<u8> = std::mem::take(&mut self.buffer);
                    let line = String::from_utf8_lossy(&line);
                    return match parse_sse_line(line.trim_end()) {
                        SseLine::Token(token) => Some(Ok(token)),
                        _ => None,
                    };
                }
            }
        }
    }

    /// Drain the stream into one string.
    pub async fn collect_text(mut self) -> Result<String, SuggestError> {
        let mut text = String::new();
        while let Some(token) = self.next_token().await {
            text.push_str(&token?);
        }
        Ok(text)
    }
}

/// Client for the suggestion gateway.
pub struct SuggestionClient {
    /// HTTP client
    http: reqwest::Client,
    /// Full URL of the suggestions endpoint
    endpoint: String,
}

impl SuggestionClient {
    /// Create a client against a gateway endpoint URL.
    pub fn new(endpoint: String) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { http, endpoint }
    }

    /// Create a client against a hosted backend's function endpoint.
    pub fn for_backend(base_url: &str) -> Self {
        Self::new(format!("{}/functions/v1/youtube-suggestions", base_url))
    }

    /// Request suggestions, returning the live token stream.
    pub async fn request(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionStream, SuggestError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
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
            _ if status.is_success() => Ok(SuggestionStream::new(response)),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(SuggestError::Api(parse_error_body(&body, status)))
            }
        }
    }

    /// Request suggestions and wait for the full text.
    pub async fn generate(&self, request: &SuggestionRequest) -> Result<String, SuggestError> {
        let stream = self.request(request).await?;
        stream.collect_text().await
    }
}

/// Pull the `error` field out of a gateway error body.
fn parse_error_body(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    format!("Gateway returned status {}", status)
}
