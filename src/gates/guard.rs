//! Route guard.
//!
//! Pure decision function run before rendering any page. Evaluated on
//! every navigation from fresh inputs; nothing here is cached.

use crate::auth::SessionPhase;
use crate::routes::Route;

/// What the shell should do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Inputs still loading: render nothing yet
    Wait,
    /// Send the user somewhere else first
    Redirect(Route),
    /// Render the requested route
    Proceed,
}

/// Decide whether a route may render.
///
/// `needs_onboarding` is `None` while the onboarding check is still in
/// flight; the guard holds rather than flash a protected page.
pub fn evaluate(
    phase: SessionPhase,
    needs_onboarding: Option<bool>,
    route: Route,
) -> GuardDecision {
    match phase {
        SessionPhase::Loading => GuardDecision::Wait,
        SessionPhase::SignedOut => {
            if route == Route::Auth {
                GuardDecision::Proceed
            } else {
                GuardDecision::Redirect(Route::Auth)
            }
        }
        SessionPhase::SignedIn => match needs_onboarding {
            None => GuardDecision::Wait,
            Some(true) if !matches!(route, Route::Auth | Route::Onboarding) => {
                GuardDecision::Redirect(Route::Onboarding)
            }
            Some(_) => GuardDecision::Proceed,
        },
    }
}
