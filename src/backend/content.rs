//! Saved generated-content access.

use std::sync::Arc;

use uuid::Uuid;

use super::client::{BackendClient, Query};
use super::types::{BackendError, NewSavedContent, SavedContent};

const TABLE: &str = "saved_content";

/// Reads and writes the `saved_content` table.
pub struct ContentStore {
    client: Arc<BackendClient>,
}

impl ContentStore {
    /// Create a new content store.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// List the user's saved items, newest first.
    pub async fn list_for(&self, user_id: Uuid) -> Result<Vec<SavedContent>, BackendError> {
        self.client
            .select(
                TABLE,
                &Query::new().eq("user_id", user_id).order_desc("created_at"),
            )
            .await
    }

    /// Save a generated item, returning the stored row.
    pub async fn save(&self, item: &NewSavedContent) -> Result<SavedContent, BackendError> {
        self.client.insert(TABLE, item).await
    }

    /// Delete a saved item by id.
    pub async fn remove(&self, id: Uuid) -> Result<(), BackendError> {
        self.client.delete(TABLE, &Query::new().eq("id", id)).await
    }
}
