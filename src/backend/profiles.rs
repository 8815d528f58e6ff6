//! Creator profile access.

use std::sync::Arc;

use uuid::Uuid;

use super::client::{BackendClient, Query};
use super::types::{BackendError, Profile, ProfilePatch};

const TABLE: &str = "profiles";

/// Reads and writes the `profiles` table.
pub struct ProfileStore {
    client: Arc<BackendClient>,
}

impl ProfileStore {
    /// Create a new profile store.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// Fetch the profile for a user, if one exists.
    ///
    /// A brand-new account may not have a profile row yet; that is a
    /// normal `None`, not an error.
    pub async fn fetch(&self, user_id: Uuid) -> Result<Option<Profile>, BackendError> {
        let rows: Vec<Profile> = self
            .client
            .select(TABLE, &Query::new().eq("id", user_id))
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Apply a partial update to the user's profile.
    pub async fn update(
        &self,
        user_id: Uuid,
        patch: &ProfilePatch,
    ) -> Result<Profile, BackendError> {
        let rows: Vec<Profile> = self
            .client
            .update(TABLE, &Query::new().eq("id", user_id), patch)
            .await?;
        rows.into_iter().next().ok_or(BackendError::NotFound)
    }
}
