//! Team approval gate.
//!
//! Admin-granted access for non-admin accounts, distinct from
//! authentication. Admins bypass the membership check entirely.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::backend::{BackendClient, RoleStore, TeamMemberStatus, TeamStore};

/// Where a user stands with team access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    /// Full access: admin role or active membership
    Approved,
    /// Invited but not yet activated; shown a waiting screen
    Pending,
    /// No access
    Denied,
}

impl AccessStatus {
    /// Whether gated features unlock.
    pub fn is_approved(&self) -> bool {
        matches!(self, AccessStatus::Approved)
    }

    /// Whether the waiting screen applies.
    pub fn is_pending(&self) -> bool {
        matches!(self, AccessStatus::Pending)
    }
}

/// Decide access from a membership standing.
///
/// Active grants access, pending stays distinct so the caller can show
/// the waiting state, and anything else (suspended, unknown, no row at
/// all) grants nothing.
pub fn status_for_membership(status: Option<TeamMemberStatus>) -> AccessStatus {
    match status {
        Some(TeamMemberStatus::Active) => AccessStatus::Approved,
        Some(TeamMemberStatus::Pending) => AccessStatus::Pending,
        Some(TeamMemberStatus::Suspended) | Some(TeamMemberStatus::Unknown) | None => {
            AccessStatus::Denied
        }
    }
}

/// Store-backed approval gate.
pub struct ApprovalGate {
    roles: RoleStore,
    team: TeamStore,
}

impl ApprovalGate {
    /// Create a gate over the shared backend client.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self {
            roles: RoleStore::new(client.clone()),
            team: TeamStore::new(client),
        }
    }

    /// Resolve the user's access status.
    ///
    /// An admin role short-circuits to approved. This check grants
    /// capability, so every read failure degrades toward less access: a
    /// failed role read just means "not admin here", and a failed
    /// membership read means denied.
    pub async fn access_status(&self, user_id: Uuid) -> AccessStatus {
        match self.roles.is_admin(user_id).await {
            Ok(true) => return AccessStatus::Approved,
            Ok(false) => {}
            Err(e) => {
                warn!("Role check failed for {}: {}", user_id, e);
            }
        }

        match self.team.member_for(user_id).await {
            Ok(member) => status_for_membership(member.map(|m| m.status)),
            Err(e) => {
                warn!("Membership check failed for {}: {}", user_id, e);
                AccessStatus::Denied
            }
        }
    }

    /// Whether the user holds the admin role.
    ///
    /// Used by the admin panel route; a failed read reads as non-admin.
    pub async fn is_admin(&self, user_id: Uuid) -> bool {
        match self.roles.is_admin(user_id).await {
            Ok(admin) => admin,
            Err(e) => {
                warn!("Role check failed for {}: {}", user_id, e);
                false
            }
        }
    }
}
