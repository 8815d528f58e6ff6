//! Shared auth types and error definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error types for auth operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Server rejected the request
    #[error("Auth error: {0}")]
    Api(String),

    /// Wrong email or password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Access token no longer accepted
    #[error("Session expired - sign in again")]
    SessionExpired,

    /// Too many attempts
    #[error("Rate limited - try again later")]
    RateLimited,

    /// Network unavailable
    #[error("Network unavailable - check connection")]
    Offline,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// An authenticated user as reported by the auth server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Unique identifier, shared with the `profiles` table
    pub id: Uuid,
    /// Sign-in email
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A signed-in session with its tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token sent with data requests
    pub access_token: String,
    /// Token used to mint a fresh access token
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    /// The user this session belongs to
    pub user: AuthUser,
}

/// Where the session currently stands.
///
/// The app starts in `Loading` and stays there until session restore
/// resolves, so dependent screens can hold rendering instead of flashing
/// the signed-out view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Restore still in flight
    #[default]
    Loading,
    /// No valid session
    SignedOut,
    /// Valid session present
    SignedIn,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Loading => write!(f, "Loading"),
            SessionPhase::SignedOut => write!(f, "Signed out"),
            SessionPhase::SignedIn => write!(f, "Signed in"),
        }
    }
}

/// Observable session snapshot.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current lifecycle phase
    pub phase: SessionPhase,
    /// The session, present only when signed in
    pub session: Option<AuthSession>,
}

impl SessionState {
    /// Snapshot for a signed-in session.
    pub fn signed_in(session: AuthSession) -> Self {
        Self {
            phase: SessionPhase::SignedIn,
            session: Some(session),
        }
    }

    /// Snapshot for the signed-out state.
    pub fn signed_out() -> Self {
        Self {
            phase: SessionPhase::SignedOut,
            session: None,
        }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// The current access token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }
}
