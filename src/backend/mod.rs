//! Hosted backend module.
//!
//! Typed access to the data plane: one store per table, a shared REST
//! client underneath, and storage uploads for tutorial thumbnails. Rows
//! are scoped to the signed-in user by row-level security on the server;
//! the stores also filter by owner so the intent is visible client-side.

pub mod activity;
pub mod client;
pub mod content;
pub mod profiles;
pub mod roles;
pub mod stats;
pub mod team;
pub mod tutorials;
pub mod types;

// Re-exports for convenience
pub use activity::{ActivityStore, DEFAULT_FEED_LIMIT};
pub use client::{BackendClient, Query};
pub use content::ContentStore;
pub use profiles::ProfileStore;
pub use roles::RoleStore;
pub use stats::StatsStore;
pub use team::TeamStore;
pub use tutorials::TutorialStore;
pub use types::{
    ActivityEntry, BackendError, ContentKind, GrowthStat, NewActivityEntry, NewGrowthStat,
    NewSavedContent, NewTutorial, Platform, Profile, ProfilePatch, Role, RoleAssignment,
    SavedContent, TeamMember, TeamMemberStatus, Tutorial, TutorialPatch,
};
