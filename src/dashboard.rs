//! Dashboard composition root.
//!
//! Wires the auth context, backend stores, gates and suggestion client
//! into one object a front end can drive. Owns the glue the individual
//! modules stay out of: propagating the access token into the backend
//! client as sessions come and go, resolving the route guard's inputs,
//! and appending activity entries after user-visible actions.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::auth::{AuthClient, AuthContext, AuthError, AuthSession, SessionStore};
use crate::backend::{
    ActivityEntry, ActivityStore, BackendClient, BackendError, ContentKind, ContentStore,
    GrowthStat, NewActivityEntry, NewSavedContent, Platform, Profile, ProfileStore, SavedContent,
    StatsStore, TutorialStore, DEFAULT_FEED_LIMIT,
};
use crate::catalog::{ServiceCatalog, TipList};
use crate::config::AppConfig;
use crate::gates::{
    evaluate, AccessStatus, ApprovalGate, GuardDecision, OnboardingForm, OnboardingGate,
};
use crate::routes::Route;
use crate::suggest::{SuggestError, SuggestionClient, SuggestionRequest, SuggestionStream};

/// Top-level dashboard state.
pub struct Dashboard {
    /// Application configuration
    config: AppConfig,
    /// Session owner
    auth: AuthContext,
    /// Shared data-plane client
    backend: Arc<BackendClient>,
    /// Profile rows
    profiles: ProfileStore,
    /// Saved generated content
    content: ContentStore,
    /// Growth snapshots
    stats: StatsStore,
    /// Activity feed
    activity: ActivityStore,
    /// Tutorial catalog and admin operations
    tutorials: TutorialStore,
    /// First-run gate
    onboarding: OnboardingGate,
    /// Team access gate
    approval: ApprovalGate,
    /// Streaming suggestion consumer
    suggestions: SuggestionClient,
    /// Static services catalog
    services: ServiceCatalog,
    /// Static quick tips
    tips: TipList,
}

impl Dashboard {
    /// Wire up the dashboard from configuration.
    pub fn new(config: AppConfig) -> Self {
        let auth_client = AuthClient::from_settings(&config.backend);
        let session_store = SessionStore::new(config.data_dir.clone());
        let auth = AuthContext::new(auth_client, session_store);

        let backend = Arc::new(BackendClient::from_settings(&config.backend));
        let profiles = ProfileStore::new(backend.clone());
        let content = ContentStore::new(backend.clone());
        let stats = StatsStore::new(backend.clone());
        let activity = ActivityStore::new(backend.clone());
        let tutorials = TutorialStore::new(backend.clone());
        let onboarding = OnboardingGate::new(backend.clone());
        let approval = ApprovalGate::new(backend.clone());

        let suggestions = SuggestionClient::for_backend(&config.backend.base_url);

        Self {
            config,
            auth,
            backend,
            profiles,
            content,
            stats,
            activity,
            tutorials,
            onboarding,
            approval,
            suggestions,
            services: ServiceCatalog::new(),
            tips: TipList::new(),
        }
    }

    /// Resolve the startup session and arm the backend client with it.
    pub async fn initialize(&self) {
        self.auth.initialize().await;
        if let Some(token) = self.auth.access_token() {
            self.backend.set_access_token(token).await;
        }
    }

    // ========== Session operations ==========

    /// Register a new account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.auth.sign_up(email, password).await?;
        self.backend
            .set_access_token(session.access_token.clone())
            .await;
        Ok(session)
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.auth.sign_in(email, password).await?;
        self.backend
            .set_access_token(session.access_token.clone())
            .await;
        Ok(session)
    }

    /// Sign out and drop the backend credential.
    pub async fn sign_out(&self) {
        self.auth.sign_out().await;
        self.backend.clear_access_token().await;
    }

    // ========== Gate checks ==========

    /// Decide what to do with a navigation to `route`.
    ///
    /// The onboarding verdict is re-read on every call; gate state is
    /// never cached across navigations.
    pub async fn route_decision(&self, route: Route) -> GuardDecision {
        let phase = self.auth.phase();
        let needs_onboarding = match self.auth.user_id() {
            Some(user_id) => Some(self.onboarding.needs_onboarding(user_id).await),
            None => None,
        };
        evaluate(phase, needs_onboarding, route)
    }

    /// The signed-in user's team access status.
    ///
    /// Approval-gated screens call this directly; it is not a route
    /// guard input. Signed out reads as denied.
    pub async fn access_status(&self) -> AccessStatus {
        match self.auth.user_id() {
            Some(user_id) => self.approval.access_status(user_id).await,
            None => AccessStatus::Denied,
        }
    }

    /// Whether the signed-in user may open the admin panel.
    pub async fn is_admin(&self) -> bool {
        match self.auth.user_id() {
            Some(user_id) => self.approval.is_admin(user_id).await,
            None => false,
        }
    }

    /// Finish the onboarding wizard for the signed-in user.
    pub async fn complete_onboarding(
        &self,
        form: &OnboardingForm,
    ) -> Result<Profile, BackendError> {
        let user_id = self.require_user()?;
        let profile = self.onboarding.complete(user_id, form).await?;
        self.record_activity(user_id, "Completed onboarding", None)
            .await;
        Ok(profile)
    }

    // ========== Content operations ==========

    /// Open a streaming suggestion request.
    pub async fn generate_suggestions(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionStream, SuggestError> {
        self.suggestions.request(request).await
    }

    /// Save a generated artifact and note it in the activity feed.
    pub async fn save_generated(
        &self,
        kind: ContentKind,
        title: String,
        body: String,
    ) -> Result<SavedContent, BackendError> {
        let user_id = self.require_user()?;
        let saved = self
            .content
            .save(&NewSavedContent {
                user_id,
                kind,
                title,
                body,
            })
            .await?;
        self.record_activity(
            user_id,
            &format!("Saved {}", kind.label()),
            Some(saved.title.clone()),
        )
        .await;
        Ok(saved)
    }

    /// The signed-in user's recent activity feed.
    pub async fn recent_activity(&self) -> Result<Vec<ActivityEntry>, BackendError> {
        let user_id = self.require_user()?;
        self.activity.recent(user_id, DEFAULT_FEED_LIMIT).await
    }

    /// The signed-in user's newest snapshot for one platform.
    ///
    /// Tool pages prefill their forms from this; a user with no history
    /// yet reads as `None`.
    pub async fn latest_snapshot(
        &self,
        platform: Platform,
    ) -> Result<Option<GrowthStat>, BackendError> {
        let user_id = self.require_user()?;
        self.stats.latest_for(user_id, platform).await
    }

    // ========== Accessors ==========

    /// The session owner.
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Profile rows.
    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Saved generated content.
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Growth snapshots.
    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    /// Activity feed.
    pub fn activity(&self) -> &ActivityStore {
        &self.activity
    }

    /// Tutorial catalog and admin operations.
    pub fn tutorials(&self) -> &TutorialStore {
        &self.tutorials
    }

    /// Static services catalog.
    pub fn services(&self) -> &ServiceCatalog {
        &self.services
    }

    /// Static quick tips.
    pub fn tips(&self) -> &TipList {
        &self.tips
    }

    /// Application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ========== Internals ==========

    /// The signed-in user's id, or a forbidden error.
    fn require_user(&self) -> Result<Uuid, BackendError> {
        self.auth
            .user_id()
            .ok_or_else(|| BackendError::Forbidden("No signed-in user".to_string()))
    }

    /// Append an activity entry, dropping failures.
    ///
    /// The feed is advisory; a failed append never fails the action it
    /// describes.
    async fn record_activity(&self, user_id: Uuid, action: &str, detail: Option<String>) {
        let entry = NewActivityEntry {
            user_id,
            action: action.to_string(),
            detail,
        };
        if let Err(e) = self.activity.record(&entry).await {
            warn!("Activity append failed for {}: {}", user_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionPhase;

    fn dashboard_with_temp_dir() -> (Dashboard, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        (Dashboard::new(config), dir)
    }

    #[tokio::test]
    async fn test_navigation_waits_while_the_session_loads() {
        let (dashboard, _dir) = dashboard_with_temp_dir();
        assert_eq!(dashboard.auth().phase(), SessionPhase::Loading);
        assert_eq!(
            dashboard.route_decision(Route::Dashboard).await,
            GuardDecision::Wait
        );
    }

    #[tokio::test]
    async fn test_signed_out_navigation_redirects_to_auth() {
        let (dashboard, _dir) = dashboard_with_temp_dir();
        dashboard.initialize().await;
        assert_eq!(dashboard.auth().phase(), SessionPhase::SignedOut);

        assert_eq!(
            dashboard.route_decision(Route::Dashboard).await,
            GuardDecision::Redirect(Route::Auth)
        );
        assert_eq!(
            dashboard.route_decision(Route::Auth).await,
            GuardDecision::Proceed
        );
    }

    #[tokio::test]
    async fn test_signed_out_access_is_denied() {
        let (dashboard, _dir) = dashboard_with_temp_dir();
        dashboard.initialize().await;

        assert_eq!(dashboard.access_status().await, AccessStatus::Denied);
        assert!(!dashboard.is_admin().await);
    }

    #[tokio::test]
    async fn test_signed_out_saves_are_rejected() {
        let (dashboard, _dir) = dashboard_with_temp_dir();
        dashboard.initialize().await;

        let result = dashboard
            .save_generated(
                ContentKind::Ideas,
                "Five video ideas".to_string(),
                "...".to_string(),
            )
            .await;
        assert!(matches!(result, Err(BackendError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_signed_out_snapshot_reads_are_rejected() {
        let (dashboard, _dir) = dashboard_with_temp_dir();
        dashboard.initialize().await;

        let result = dashboard.latest_snapshot(Platform::Youtube).await;
        assert!(matches!(result, Err(BackendError::Forbidden(_))));
    }

    #[test]
    fn test_static_catalogs_are_populated() {
        let (dashboard, _dir) = dashboard_with_temp_dir();
        assert!(!dashboard.services().all().is_empty());
        assert!(!dashboard.tips().all().is_empty());
    }
}
