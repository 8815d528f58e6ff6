//! On-disk session persistence for restore across launches.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::types::AuthSession;

/// Tokens kept between launches.
///
/// The access token is validated against the user endpoint before it is
/// trusted again; the refresh token mints a replacement when it fails.
/// Older files carry only the refresh token, so the access token
/// defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Access token from the last session, possibly stale
    #[serde(default)]
    pub access_token: String,
    /// Refresh token from the last session
    pub refresh_token: String,
}

impl From<&AuthSession> for PersistedSession {
    fn from(session: &AuthSession) -> Self {
        Self {
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
        }
    }
}

/// Reads and writes the persisted session file.
pub struct SessionStore {
    /// Path of the session file
    path: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join("session.json"),
        }
    }

    /// Load the persisted session, if one exists and parses.
    ///
    /// A corrupt or unreadable file is treated as no session; restore then
    /// lands in the signed-out state instead of failing startup.
    pub fn load(&self) -> Option<PersistedSession> {
        if !self.path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read session file: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Failed to parse session file: {}", e);
                None
            }
        }
    }

    /// Persist the session for the next launch.
    pub fn save(&self, session: &AuthSession) {
        let persisted = PersistedSession::from(session);

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create session directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(&persisted) {
            Ok(content) => {
                if let Err(e) = std::fs::write(&self.path, content) {
                    warn!("Failed to write session file: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize session: {}", e),
        }
    }

    /// Remove the persisted session.
    pub fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Failed to remove session file: {}", e);
            }
        }
    }
}
