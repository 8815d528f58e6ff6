//! Ad revenue calculator.

use super::{round2, ToolError};

/// Share of ad revenue left after the platform's cut.
const CREATOR_SHARE: f64 = 0.55;

/// Inputs for the revenue calculator.
#[derive(Debug, Clone, Copy)]
pub struct RevenueInputs {
    /// Average views per day
    pub daily_views: f64,
    /// Advertiser CPM in dollars per thousand views
    pub cpm: f64,
}

/// Derived revenue numbers, all in dollars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueEstimate {
    /// Estimated revenue per day
    pub daily: f64,
    /// Estimated revenue per 30-day month
    pub monthly: f64,
    /// Estimated revenue per year
    pub yearly: f64,
    /// Creator-side RPM after the platform's cut
    pub rpm: f64,
}

/// Estimate ad revenue from daily views and CPM.
///
/// Revenue scales from `views / 1000 x CPM`; the displayed RPM applies
/// the platform's revenue split on top of the advertiser CPM.
pub fn estimate_revenue(inputs: &RevenueInputs) -> Result<RevenueEstimate, ToolError> {
    if !inputs.daily_views.is_finite() || !inputs.cpm.is_finite() {
        return Err(ToolError::NotANumber("Enter valid numbers"));
    }
    if inputs.daily_views <= 0.0 {
        return Err(ToolError::OutOfRange("Daily views must be greater than zero"));
    }
    if inputs.cpm <= 0.0 {
        return Err(ToolError::OutOfRange("CPM must be greater than zero"));
    }

    let daily = inputs.daily_views / 1000.0 * inputs.cpm;

    Ok(RevenueEstimate {
        daily: round2(daily),
        monthly: round2(daily * 30.0),
        yearly: round2(daily * 365.0),
        rpm: round2(inputs.cpm * CREATOR_SHARE),
    })
}
