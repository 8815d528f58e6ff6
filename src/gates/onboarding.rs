//! Onboarding gate and wizard.
//!
//! One-time profile completion required before full app access. The gate
//! reads the profile row to decide whether the wizard still needs to run;
//! the wizard collects channel details and, on completion, flips the
//! profile flag and seeds a baseline growth snapshot.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::backend::{
    BackendClient, BackendError, NewGrowthStat, Platform, Profile, ProfilePatch, ProfileStore,
    StatsStore,
};

/// A step in the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    /// Intro screen
    Welcome,
    /// Display name
    Creator,
    /// Channel name, URL, platform and niche
    Channel,
    /// Current follower and view counts
    Baseline,
}

impl OnboardingStep {
    /// All steps in order.
    pub fn all() -> &'static [OnboardingStep] {
        &[
            OnboardingStep::Welcome,
            OnboardingStep::Creator,
            OnboardingStep::Channel,
            OnboardingStep::Baseline,
        ]
    }

    /// The next step, or `None` on the last.
    pub fn next(&self) -> Option<OnboardingStep> {
        match self {
            OnboardingStep::Welcome => Some(OnboardingStep::Creator),
            OnboardingStep::Creator => Some(OnboardingStep::Channel),
            OnboardingStep::Channel => Some(OnboardingStep::Baseline),
            OnboardingStep::Baseline => None,
        }
    }

    /// The previous step, or `None` on the first.
    pub fn previous(&self) -> Option<OnboardingStep> {
        match self {
            OnboardingStep::Welcome => None,
            OnboardingStep::Creator => Some(OnboardingStep::Welcome),
            OnboardingStep::Channel => Some(OnboardingStep::Creator),
            OnboardingStep::Baseline => Some(OnboardingStep::Channel),
        }
    }

    /// Heading shown for this step.
    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Welcome",
            OnboardingStep::Creator => "About you",
            OnboardingStep::Channel => "Your channel",
            OnboardingStep::Baseline => "Where you are today",
        }
    }
}

/// Answers collected by the wizard.
#[derive(Debug, Clone)]
pub struct OnboardingForm {
    /// Name shown in the dashboard header
    pub display_name: String,
    /// Channel name
    pub channel_name: String,
    /// Channel URL
    pub channel_url: String,
    /// Content niche
    pub niche: String,
    /// Primary platform for the baseline snapshot
    pub platform: Platform,
    /// Current follower count
    pub followers: i64,
    /// Current total view count
    pub views: i64,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            channel_name: String::new(),
            channel_url: String::new(),
            niche: String::new(),
            platform: Platform::Youtube,
            followers: 0,
            views: 0,
        }
    }
}

impl OnboardingForm {
    /// Check the form is complete enough to finish onboarding.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.channel_name.trim().is_empty() {
            return Err("Channel name is required");
        }
        if self.followers < 0 {
            return Err("Follower count cannot be negative");
        }
        if self.views < 0 {
            return Err("View count cannot be negative");
        }
        Ok(())
    }
}

/// Wizard step state.
pub struct OnboardingWizard {
    /// Current step
    current_step: OnboardingStep,
    /// Collected answers
    pub form: OnboardingForm,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    /// Start the wizard at the welcome step.
    pub fn new() -> Self {
        Self {
            current_step: OnboardingStep::Welcome,
            form: OnboardingForm::default(),
        }
    }

    /// The step currently shown.
    pub fn current_step(&self) -> OnboardingStep {
        self.current_step
    }

    /// Advance to the next step, if there is one.
    pub fn next_step(&mut self) {
        if let Some(next) = self.current_step.next() {
            self.current_step = next;
        }
    }

    /// Go back to the previous step, if there is one.
    pub fn previous_step(&mut self) {
        if let Some(previous) = self.current_step.previous() {
            self.current_step = previous;
        }
    }

    /// Whether the wizard is on its final step.
    pub fn on_last_step(&self) -> bool {
        self.current_step.next().is_none()
    }

    /// Progress through the wizard as a percentage (0-100).
    pub fn progress_percent(&self) -> u8 {
        let all = OnboardingStep::all();
        let position = all
            .iter()
            .position(|s| *s == self.current_step)
            .unwrap_or(0);
        ((position * 100) / (all.len() - 1)) as u8
    }
}

/// Decide the gate verdict from a profile fetch outcome.
///
/// Onboarding is needed only when a profile row exists with the flag
/// unset. A missing row or a failed read resolves to "no onboarding":
/// this gate sequences a first-run flow and never grants capability, so
/// it fails open.
pub fn needs_onboarding_verdict(fetch: Result<Option<Profile>, BackendError>) -> bool {
    match fetch {
        Ok(Some(profile)) => !profile.onboarding_completed,
        Ok(None) => false,
        Err(_) => false,
    }
}

/// Store-backed onboarding gate.
pub struct OnboardingGate {
    profiles: ProfileStore,
    stats: StatsStore,
}

impl OnboardingGate {
    /// Create a gate over the shared backend client.
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self {
            profiles: ProfileStore::new(client.clone()),
            stats: StatsStore::new(client),
        }
    }

    /// Whether the user still needs to run the wizard.
    pub async fn needs_onboarding(&self, user_id: Uuid) -> bool {
        let fetch = self.profiles.fetch(user_id).await;
        if let Err(e) = &fetch {
            warn!("Onboarding check failed for {}: {}", user_id, e);
        }
        needs_onboarding_verdict(fetch)
    }

    /// Finish onboarding: persist the channel details, flip the flag and
    /// seed the day-zero growth snapshot.
    ///
    /// The profile write is the completion; a failed baseline snapshot is
    /// logged and dropped so the user is not re-onboarded over it.
    pub async fn complete(
        &self,
        user_id: Uuid,
        form: &OnboardingForm,
    ) -> Result<Profile, BackendError> {
        form.validate().map_err(|m| BackendError::Api(m.to_string()))?;

        let patch = ProfilePatch {
            display_name: non_empty(&form.display_name),
            channel_name: non_empty(&form.channel_name),
            channel_url: non_empty(&form.channel_url),
            niche: non_empty(&form.niche),
            onboarding_completed: Some(true),
        };
        let profile = self.profiles.update(user_id, &patch).await?;

        let baseline = NewGrowthStat {
            user_id,
            date: Utc::now().date_naive(),
            platform: form.platform,
            followers: form.followers,
            views: form.views,
        };
        if let Err(e) = self.stats.record(&baseline).await {
            warn!("Baseline snapshot failed for {}: {}", user_id, e);
        }

        Ok(profile)
    }
}

/// Trimmed string as an optional update value.
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
