//! Session lifecycle owner.
//!
//! `AuthContext` is constructed once and handed to whatever needs it;
//! there is no ambient global. Interested parties observe the session
//! through a watch channel instead of polling.

use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use super::client::AuthClient;
use super::store::{PersistedSession, SessionStore};
use super::types::{AuthError, AuthSession, SessionPhase, SessionState};

/// Owns the session and pushes state changes to subscribers.
pub struct AuthContext {
    /// Auth server client
    client: AuthClient,
    /// Persisted-session store
    store: SessionStore,
    /// Broadcast point for session snapshots
    state: watch::Sender<SessionState>,
}

impl AuthContext {
    /// Create a context in the loading phase.
    pub fn new(client: AuthClient, store: SessionStore) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            client,
            store,
            state,
        }
    }

    /// Resolve the startup session.
    ///
    /// Revalidates the persisted tokens against the auth server; lands
    /// in `SignedIn` on success and `SignedOut` otherwise. Until this
    /// returns the context reports `Loading` and route decisions hold.
    pub async fn initialize(&self) {
        let Some(persisted) = self.store.load() else {
            self.state.send_replace(SessionState::signed_out());
            return;
        };

        match self.restore(persisted).await {
            Ok(session) => {
                info!("Restored session for {}", session.user.email);
                self.store.save(&session);
                self.state.send_replace(SessionState::signed_in(session));
            }
            Err(e) => {
                warn!("Session restore failed: {}", e);
                self.store.clear();
                self.state.send_replace(SessionState::signed_out());
            }
        }
    }

    /// Rebuild a session from persisted tokens.
    ///
    /// The access token is only trusted once the user endpoint confirms
    /// it still identifies someone; any rejection falls through to the
    /// refresh grant.
    async fn restore(&self, persisted: PersistedSession) -> Result<AuthSession, AuthError> {
        if !persisted.access_token.is_empty() {
            match self.client.fetch_user(&persisted.access_token).await {
                Ok(user) => {
                    return Ok(AuthSession {
                        access_token: persisted.access_token,
                        refresh_token: persisted.refresh_token,
                        // The user endpoint does not re-report a lifetime
                        expires_in: 0,
                        user,
                    });
                }
                Err(e) => warn!("Persisted access token rejected: {}", e),
            }
        }
        self.client.refresh(&persisted.refresh_token).await
    }

    /// Register a new account and enter the signed-in state.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.client.sign_up(email, password).await?;
        self.store.save(&session);
        self.state
            .send_replace(SessionState::signed_in(session.clone()));
        Ok(session)
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.client.sign_in(email, password).await?;
        self.store.save(&session);
        self.state
            .send_replace(SessionState::signed_in(session.clone()));
        Ok(session)
    }

    /// Sign out: revoke server-side, then drop all local session state.
    ///
    /// Local teardown happens even when revocation fails, so a dead
    /// network never traps the user in a signed-in shell.
    pub async fn sign_out(&self) {
        let token = self.state.borrow().access_token().map(str::to_string);

        if let Some(token) = token {
            if let Err(e) = self.client.sign_out(&token).await {
                warn!("Server-side sign-out failed: {}", e);
            }
        }

        self.store.clear();
        self.state.send_replace(SessionState::signed_out());
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    /// Snapshot of the current session state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The signed-in user's id, if any.
    pub fn user_id(&self) -> Option<Uuid> {
        self.state.borrow().user().map(|u| u.id)
    }

    /// The current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.state.borrow().access_token().map(str::to_string)
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}
