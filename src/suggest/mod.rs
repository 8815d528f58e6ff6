//! AI suggestion module.
//!
//! Everything around AI-generated content ideas: the prompt templates,
//! the gateway service that relays streaming completions from the
//! upstream provider, and the client the dashboard uses to consume the
//! stream.

pub mod client;
pub mod gateway;
pub mod prompts;
pub mod types;

// Re-exports for convenience
pub use client::{SuggestionClient, SuggestionStream};
pub use gateway::{router, serve, GatewayState};
pub use types::{
    ChannelSnapshot, ChatMessage, ChatRequest, SuggestError, SuggestionKind, SuggestionRequest,
    VideoSnapshot,
};
