//! Watch-time calculator.

use super::{round1, round2, ToolError};

/// CPM assumed for the revenue estimate, in dollars.
const ASSUMED_CPM: f64 = 3.0;

/// Retention that earns the baseline CPM. Audiences that watch more of
/// each video scale the estimate up proportionally.
const BASELINE_RETENTION_PERCENT: f64 = 50.0;

/// Inputs for the watch-time calculator.
#[derive(Debug, Clone, Copy)]
pub struct WatchTimeInputs {
    /// Views in the period
    pub views: f64,
    /// Full video length in minutes
    pub video_minutes: f64,
    /// Average percentage of the video watched (0-100]
    pub retention_percent: f64,
}

/// Derived watch-time numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchTimeEstimate {
    /// Average minutes watched per view
    pub avg_view_minutes: f64,
    /// Total watch time across all views, in hours, one decimal
    pub total_watch_hours: f64,
    /// Revenue estimate in dollars at the assumed CPM
    pub revenue_estimate: f64,
}

/// Estimate watch time and its revenue impact.
pub fn estimate_watch_time(inputs: &WatchTimeInputs) -> Result<WatchTimeEstimate, ToolError> {
    if !inputs.views.is_finite()
        || !inputs.video_minutes.is_finite()
        || !inputs.retention_percent.is_finite()
    {
        return Err(ToolError::NotANumber("Enter valid numbers"));
    }
    if inputs.views <= 0.0 {
        return Err(ToolError::OutOfRange("Views must be greater than zero"));
    }
    if inputs.video_minutes <= 0.0 {
        return Err(ToolError::OutOfRange("Video length must be greater than zero"));
    }
    if inputs.retention_percent <= 0.0 || inputs.retention_percent > 100.0 {
        return Err(ToolError::OutOfRange("Retention must be between 0 and 100 percent"));
    }

    let avg_view_minutes = inputs.video_minutes * inputs.retention_percent / 100.0;
    let total_hours = inputs.views * avg_view_minutes / 60.0;
    let retention_factor = inputs.retention_percent / BASELINE_RETENTION_PERCENT;
    let revenue = inputs.views / 1000.0 * ASSUMED_CPM * retention_factor;

    Ok(WatchTimeEstimate {
        avg_view_minutes: round2(avg_view_minutes),
        total_watch_hours: round1(total_hours),
        revenue_estimate: round2(revenue),
    })
}
