//! Role assignment access.

use std::sync::Arc;

use uuid::Uuid;

use super::client::{BackendClient, Query};
use super::types::{BackendError, RoleAssignment};

const TABLE: &str = "user_roles";

/// Reads the `user_roles` table.
pub struct RoleStore {
    client: Arc<BackendClient>,
}

impl RoleStore {
    /// Create a new role store.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// Fetch all roles assigned to a user.
    pub async fn roles_for(&self, user_id: Uuid) -> Result<Vec<RoleAssignment>, BackendError> {
        self.client
            .select(TABLE, &Query::new().eq("user_id", user_id))
            .await
    }

    /// Whether the user holds the admin role.
    pub async fn is_admin(&self, user_id: Uuid) -> Result<bool, BackendError> {
        let roles = self.roles_for(user_id).await?;
        Ok(roles.iter().any(|assignment| assignment.role.is_admin()))
    }
}
