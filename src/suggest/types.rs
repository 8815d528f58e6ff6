//! Shared suggestion types and error definitions.
//!
//! The request body matches the wire shape the dashboard sends:
//! `{channelData, videos, suggestionType}` with camelCase fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for suggestion generation.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Upstream provider is throttling
    #[error("Rate limit exceeded, please try again later.")]
    RateLimited,

    /// Upstream provider account is out of credits
    #[error("AI credits exhausted, please add credits to continue.")]
    CreditsExhausted,

    /// Any other upstream or gateway failure
    #[error("Suggestion service error: {0}")]
    Api(String),

    /// Network unavailable
    #[error("Network unavailable - check connection")]
    Offline,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// What kind of suggestions to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Full video scripts to produce next
    Scripts,
    /// Short-form video hooks
    Shorts,
    /// A posting schedule
    Schedule,
    /// Channel growth moves
    Growth,
}

impl SuggestionKind {
    /// All kinds, in display order.
    pub fn all() -> &'static [SuggestionKind] {
        &[
            SuggestionKind::Scripts,
            SuggestionKind::Shorts,
            SuggestionKind::Schedule,
            SuggestionKind::Growth,
        ]
    }

    /// Button label for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            SuggestionKind::Scripts => "Video Scripts",
            SuggestionKind::Shorts => "Shorts Ideas",
            SuggestionKind::Schedule => "Posting Schedule",
            SuggestionKind::Growth => "Growth Plan",
        }
    }
}

/// Channel-level metrics sent with a suggestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnapshot {
    /// Channel name
    pub name: String,
    /// Subscriber count
    pub subscribers: i64,
    /// Lifetime view count
    pub total_views: i64,
    /// Number of uploaded videos
    pub video_count: i64,
    /// Content niche, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
}

/// Per-video metrics sent with a suggestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnapshot {
    /// Video title
    pub title: String,
    /// View count
    pub views: i64,
    /// Like count, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    /// Comment count, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<i64>,
}

/// A suggestion request as posted to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Channel metrics
    #[serde(rename = "channelData")]
    pub channel: ChannelSnapshot,
    /// Recent video metrics
    pub videos: Vec<VideoSnapshot>,
    /// Kind of suggestions wanted
    #[serde(rename = "suggestionType")]
    pub kind: SuggestionKind,
}

/// One message in an upstream chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system` or `user`
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    pub fn system(content: String) -> Self {
        Self {
            role: "system".to_string(),
            content,
        }
    }

    /// Build a user message.
    pub fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

/// Upstream chat-completion request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Prompt messages
    pub messages: &'a [ChatMessage],
    /// Always true: the gateway only relays streams
    pub stream: bool,
}
