//! Growth statistics access.

use std::sync::Arc;

use uuid::Uuid;

use super::client::{BackendClient, Query};
use super::types::{BackendError, GrowthStat, NewGrowthStat, Platform};

const TABLE: &str = "growth_stats";

/// Conflict key for snapshot upserts.
///
/// One snapshot per user, day and platform; recording the same key
/// again overwrites the previous numbers rather than duplicating them.
const CONFLICT_KEY: &str = "user_id,date,platform";

/// Reads and writes the `growth_stats` table.
pub struct StatsStore {
    client: Arc<BackendClient>,
}

impl StatsStore {
    /// Create a new stats store.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// The user's full snapshot history in chronological order.
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<GrowthStat>, BackendError> {
        self.client
            .select(
                TABLE,
                &Query::new().eq("user_id", user_id).order_asc("date"),
            )
            .await
    }

    /// The most recent snapshot for one platform, if any.
    pub async fn latest_for(
        &self,
        user_id: Uuid,
        platform: Platform,
    ) -> Result<Option<GrowthStat>, BackendError> {
        let rows: Vec<GrowthStat> = self
            .client
            .select(
                TABLE,
                &Query::new()
                    .eq("user_id", user_id)
                    .eq("platform", platform.wire_name())
                    .order_desc("date")
                    .limit(1),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Record a snapshot, overwriting any existing row for the same
    /// user, day and platform.
    pub async fn record(&self, stat: &NewGrowthStat) -> Result<GrowthStat, BackendError> {
        self.client.upsert(TABLE, CONFLICT_KEY, stat).await
    }
}
