//! Tutorial catalog access and thumbnail uploads.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::client::{BackendClient, Query};
use super::types::{BackendError, NewTutorial, Tutorial, TutorialPatch};

const TABLE: &str = "tutorials";

/// Public bucket holding tutorial thumbnails.
const THUMBNAIL_BUCKET: &str = "tutorial-thumbnails";

/// Reads and writes the `tutorials` table.
pub struct TutorialStore {
    client: Arc<BackendClient>,
}

impl TutorialStore {
    /// Create a new tutorial store.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// Tutorials visible to members, newest first.
    pub async fn published(&self) -> Result<Vec<Tutorial>, BackendError> {
        self.client
            .select(
                TABLE,
                &Query::new().eq("published", "true").order_desc("created_at"),
            )
            .await
    }

    /// Every tutorial including drafts, newest first. Admin view.
    pub async fn all(&self) -> Result<Vec<Tutorial>, BackendError> {
        self.client
            .select(TABLE, &Query::new().order_desc("created_at"))
            .await
    }

    /// Create a tutorial, returning the stored row.
    pub async fn create(&self, tutorial: &NewTutorial) -> Result<Tutorial, BackendError> {
        self.client.insert(TABLE, tutorial).await
    }

    /// Apply a partial update to a tutorial.
    pub async fn update(&self, id: Uuid, patch: &TutorialPatch) -> Result<Tutorial, BackendError> {
        let rows: Vec<Tutorial> = self
            .client
            .update(TABLE, &Query::new().eq("id", id), patch)
            .await?;
        rows.into_iter().next().ok_or(BackendError::NotFound)
    }

    /// Delete a tutorial by id.
    pub async fn remove(&self, id: Uuid) -> Result<(), BackendError> {
        self.client.delete(TABLE, &Query::new().eq("id", id)).await
    }

    /// Upload a thumbnail for a tutorial and point the row at it.
    ///
    /// The object lands at `{tutorial_id}/thumbnail.{ext}` in the public
    /// thumbnail bucket, overwriting any previous upload for the same
    /// tutorial. Returns the updated row.
    pub async fn upload_thumbnail(
        &self,
        id: Uuid,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Tutorial, BackendError> {
        let ext = extension_of(filename)
            .ok_or_else(|| BackendError::Api(format!("No file extension on '{}'", filename)))?;
        let content_type = content_type_for(&ext).ok_or_else(|| {
            BackendError::Api(format!("Unsupported thumbnail extension '.{}'", ext))
        })?;

        let path = format!("{}/thumbnail.{}", id, ext);
        let url = self
            .client
            .upload_object(THUMBNAIL_BUCKET, &path, content_type, bytes)
            .await?;

        info!("Uploaded thumbnail for tutorial {}", id);

        self.update(
            id,
            &TutorialPatch {
                thumbnail_url: Some(url),
                ..Default::default()
            },
        )
        .await
    }
}

/// Lowercased file extension, if present.
fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// MIME type for a supported image extension.
fn content_type_for(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
