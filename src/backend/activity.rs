//! Activity log access.

use std::sync::Arc;

use uuid::Uuid;

use super::client::{BackendClient, Query};
use super::types::{ActivityEntry, BackendError, NewActivityEntry};

const TABLE: &str = "activity_log";

/// Default number of entries shown in the dashboard feed.
pub const DEFAULT_FEED_LIMIT: u32 = 10;

/// Reads and writes the `activity_log` table.
pub struct ActivityStore {
    client: Arc<BackendClient>,
}

impl ActivityStore {
    /// Create a new activity store.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// The user's most recent events, newest first.
    pub async fn recent(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<ActivityEntry>, BackendError> {
        self.client
            .select(
                TABLE,
                &Query::new()
                    .eq("user_id", user_id)
                    .order_desc("created_at")
                    .limit(limit),
            )
            .await
    }

    /// Append an event to the log.
    pub async fn record(&self, entry: &NewActivityEntry) -> Result<ActivityEntry, BackendError> {
        self.client.insert(TABLE, entry).await
    }
}
