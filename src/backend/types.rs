//! Shared backend types and error definitions.
//!
//! Row structs mirror the hosted tables; `New*` and `*Patch` structs are
//! the write payloads. Identifiers and timestamps are server-generated,
//! so write payloads leave them out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error types for backend table and storage operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Server rejected the request
    #[error("Backend error: {0}")]
    Api(String),

    /// No matching row
    #[error("Not found")]
    NotFound,

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Row-level security denied the request
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Rate limited by the backend
    #[error("Rate limited - try again later")]
    RateLimited,

    /// Network unavailable
    #[error("Network unavailable - check connection")]
    Offline,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ========== Enums ==========

/// Platform a growth stat belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Instagram,
}

impl Platform {
    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::Tiktok => "TikTok",
            Platform::Instagram => "Instagram",
        }
    }

    /// Value stored in the `platform` column.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// What kind of generated content a saved item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Full video script
    Script,
    /// Title tags and keywords
    Tags,
    /// Brainstormed video ideas
    Ideas,
    /// Posting schedule / content plan
    Plan,
}

impl ContentKind {
    /// Card label shown in the library.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Script => "Video Script",
            ContentKind::Tags => "Tags & Keywords",
            ContentKind::Ideas => "Content Ideas",
            ContentKind::Plan => "Content Plan",
        }
    }

    /// Accent color for the card, as a hex string.
    pub fn accent(&self) -> &'static str {
        match self {
            ContentKind::Script => "#8b5cf6",
            ContentKind::Tags => "#f59e0b",
            ContentKind::Ideas => "#10b981",
            ContentKind::Plan => "#3b82f6",
        }
    }

    /// Icon token for the card.
    pub fn icon(&self) -> &'static str {
        match self {
            ContentKind::Script => "file-text",
            ContentKind::Tags => "tag",
            ContentKind::Ideas => "lightbulb",
            ContentKind::Plan => "calendar",
        }
    }
}

/// Membership standing of a team member row.
///
/// Values the server does not know about yet fold into `Unknown`, which
/// grants nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeamMemberStatus {
    Active,
    Pending,
    Suspended,
    Unknown,
}

impl From<String> for TeamMemberStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => TeamMemberStatus::Active,
            "pending" => TeamMemberStatus::Pending,
            "suspended" => TeamMemberStatus::Suspended,
            _ => TeamMemberStatus::Unknown,
        }
    }
}

impl From<TeamMemberStatus> for String {
    fn from(value: TeamMemberStatus) -> Self {
        match value {
            TeamMemberStatus::Active => "active",
            TeamMemberStatus::Pending => "pending",
            TeamMemberStatus::Suspended => "suspended",
            TeamMemberStatus::Unknown => "unknown",
        }
        .to_string()
    }
}

/// Role assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Moderator,
    Member,
    Unknown,
}

impl Role {
    /// Whether this role grants the admin panel.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "moderator" => Role::Moderator,
            "user" => Role::Member,
            _ => Role::Unknown,
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Member => "user",
            Role::Unknown => "unknown",
        }
        .to_string()
    }
}

// ========== Rows ==========

/// A creator profile row, keyed by the auth user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Auth user id
    pub id: Uuid,
    /// Name shown in the dashboard header
    pub display_name: Option<String>,
    /// Channel name collected during onboarding
    pub channel_name: Option<String>,
    /// Channel URL collected during onboarding
    pub channel_url: Option<String>,
    /// Content niche collected during onboarding
    pub niche: Option<String>,
    /// Whether the onboarding wizard has been completed
    #[serde(default)]
    pub onboarding_completed: bool,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
}

/// A team membership row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    /// Row id
    pub id: Uuid,
    /// The member's auth user id
    pub user_id: Uuid,
    /// Contact email for the membership
    pub email: Option<String>,
    /// Membership standing
    pub status: TeamMemberStatus,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A role assignment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Row id
    pub id: Uuid,
    /// The user this role applies to
    pub user_id: Uuid,
    /// Assigned role
    pub role: Role,
}

/// A saved generated-content row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedContent {
    /// Row id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// What kind of content this is
    pub kind: ContentKind,
    /// Card title
    pub title: String,
    /// Generated text
    pub body: String,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for saving a generated item.
#[derive(Debug, Clone, Serialize)]
pub struct NewSavedContent {
    pub user_id: Uuid,
    pub kind: ContentKind,
    pub title: String,
    pub body: String,
}

/// A per-day, per-platform growth snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthStat {
    /// Row id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Snapshot date
    pub date: NaiveDate,
    /// Platform the numbers belong to
    pub platform: Platform,
    /// Follower / subscriber count on that date
    pub followers: i64,
    /// Cumulative view count on that date
    pub views: i64,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a growth snapshot.
///
/// One row per `(user_id, date, platform)`; re-recording the same key
/// overwrites the previous numbers.
#[derive(Debug, Clone, Serialize)]
pub struct NewGrowthStat {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub platform: Platform,
    pub followers: i64,
    pub views: i64,
}

/// An activity log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Row id
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Event label, e.g. `generated_script`
    pub action: String,
    /// Optional free-form detail
    pub detail: Option<String>,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for appending an activity event.
#[derive(Debug, Clone, Serialize)]
pub struct NewActivityEntry {
    pub user_id: Uuid,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A tutorial row managed from the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutorial {
    /// Row id
    pub id: Uuid,
    /// Tutorial title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Category label for grouping
    pub category: Option<String>,
    /// Link to the tutorial video
    pub video_url: Option<String>,
    /// Public URL of the uploaded thumbnail
    pub thumbnail_url: Option<String>,
    /// Whether members can see this tutorial
    #[serde(default)]
    pub published: bool,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a tutorial.
#[derive(Debug, Clone, Serialize)]
pub struct NewTutorial {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub published: bool,
}

/// Partial tutorial update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TutorialPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}
