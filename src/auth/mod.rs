//! Authentication module.
//!
//! Session lifecycle against the hosted auth server: sign-up, sign-in,
//! sign-out, restore on launch, and an observable session state that the
//! route guard and screens react to.

pub mod client;
pub mod context;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use client::AuthClient;
pub use context::AuthContext;
pub use store::{PersistedSession, SessionStore};
pub use types::{AuthError, AuthSession, AuthUser, SessionPhase, SessionState};
