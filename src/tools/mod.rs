//! Creator tools module.
//!
//! Pure calculators behind the tools pages. Each takes validated form
//! input and returns derived display numbers synchronously; nothing in
//! here touches the network or suspends.

use thiserror::Error;

pub mod growth;
pub mod revenue;
pub mod watch_time;

// Re-exports for convenience
pub use growth::{estimate_growth, GrowthEstimate, GrowthInputs};
pub use revenue::{estimate_revenue, RevenueEstimate, RevenueInputs};
pub use watch_time::{estimate_watch_time, WatchTimeEstimate, WatchTimeInputs};

/// Why a calculator refused to run.
///
/// The carried message is written for the form that collected the inputs
/// and is shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ToolError {
    /// An input is missing, NaN, or infinite
    #[error("{0}")]
    NotANumber(&'static str),
    /// An input is outside its allowed range
    #[error("{0}")]
    OutOfRange(&'static str),
}

/// Round to two decimal places for currency and percentages.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place for hour totals.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_helpers_round_half_away_from_zero() {
        assert_eq!(round2(1.6500000000000001), 1.65);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round1(833.333), 833.3);
        assert_eq!(round1(-1.25), -1.3);
    }
}
