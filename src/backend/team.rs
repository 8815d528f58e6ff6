//! Team membership access.

use std::sync::Arc;

use uuid::Uuid;

use super::client::{BackendClient, Query};
use super::types::{BackendError, TeamMember};

const TABLE: &str = "team_members";

/// Reads the `team_members` table.
pub struct TeamStore {
    client: Arc<BackendClient>,
}

impl TeamStore {
    /// Create a new team store.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// Fetch the membership row for a user, if any.
    pub async fn member_for(&self, user_id: Uuid) -> Result<Option<TeamMember>, BackendError> {
        let rows: Vec<TeamMember> = self
            .client
            .select(TABLE, &Query::new().eq("user_id", user_id))
            .await?;
        Ok(rows.into_iter().next())
    }
}
