//! Access gates module.
//!
//! The checks that stand between a session and the pages it may see:
//! the onboarding gate (first-run sequencing, resolves open on failure),
//! the approval gate (capability, resolves closed on failure) and the
//! route guard that turns both into a navigation decision.

pub mod approval;
pub mod guard;
pub mod onboarding;

// Re-exports for convenience
pub use approval::{status_for_membership, AccessStatus, ApprovalGate};
pub use guard::{evaluate, GuardDecision};
pub use onboarding::{
    needs_onboarding_verdict, OnboardingForm, OnboardingGate, OnboardingStep, OnboardingWizard,
};
