//! Subscriber growth calculator.

use super::{round2, ToolError};

/// Inputs for the growth calculator.
#[derive(Debug, Clone, Copy)]
pub struct GrowthInputs {
    /// Subscriber count at the start of the period
    pub start_count: f64,
    /// Subscriber count at the end of the period
    pub end_count: f64,
    /// Length of the period in days
    pub period_days: u32,
}

/// Derived growth numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthEstimate {
    /// Percentage change over the period, two decimals
    pub growth_percent: f64,
    /// Average subscribers gained per day
    pub daily_growth: f64,
    /// Projected count 30 days out, rounded to a whole number
    pub projected_30_day: f64,
}

/// Compute growth over a period and a 30-day projection.
///
/// Growth is `(end - start) / start x 100`; the projection extends the
/// observed daily rate 30 days past the end count.
pub fn estimate_growth(inputs: &GrowthInputs) -> Result<GrowthEstimate, ToolError> {
    if !inputs.start_count.is_finite() || !inputs.end_count.is_finite() {
        return Err(ToolError::NotANumber("Enter valid subscriber counts"));
    }
    if inputs.start_count <= 0.0 {
        return Err(ToolError::OutOfRange("Starting count must be greater than zero"));
    }
    if inputs.end_count < 0.0 {
        return Err(ToolError::OutOfRange("Ending count cannot be negative"));
    }
    if inputs.period_days == 0 {
        return Err(ToolError::OutOfRange("Period must be at least one day"));
    }

    let change = inputs.end_count - inputs.start_count;
    let daily_growth = change / inputs.period_days as f64;

    Ok(GrowthEstimate {
        growth_percent: round2(change / inputs.start_count * 100.0),
        daily_growth,
        projected_30_day: (inputs.end_count + daily_growth * 30.0).round(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifty_percent_growth_over_a_month() {
        let estimate = estimate_growth(&GrowthInputs {
            start_count: 1000.0,
            end_count: 1500.0,
            period_days: 30,
        })
        .unwrap();

        assert_eq!(estimate.growth_percent, 50.0);
        assert_eq!(estimate.projected_30_day, 2000.0);
    }

    #[test]
    fn test_shrinking_channel_reports_negative_growth() {
        let estimate = estimate_growth(&GrowthInputs {
            start_count: 2000.0,
            end_count: 1500.0,
            period_days: 10,
        })
        .unwrap();

        assert_eq!(estimate.growth_percent, -25.0);
        assert_eq!(estimate.daily_growth, -50.0);
        assert_eq!(estimate.projected_30_day, 0.0);
    }

    #[test]
    fn test_growth_percent_rounds_to_two_decimals() {
        let estimate = estimate_growth(&GrowthInputs {
            start_count: 3000.0,
            end_count: 3100.0,
            period_days: 7,
        })
        .unwrap();

        // 100 / 3000 * 100 = 3.333...
        assert_eq!(estimate.growth_percent, 3.33);
    }

    #[test]
    fn test_zero_start_is_rejected() {
        let result = estimate_growth(&GrowthInputs {
            start_count: 0.0,
            end_count: 100.0,
            period_days: 30,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_days_is_rejected() {
        let result = estimate_growth(&GrowthInputs {
            start_count: 100.0,
            end_count: 200.0,
            period_days: 0,
        });
        assert_eq!(
            result.unwrap_err(),
            ToolError::OutOfRange("Period must be at least one day")
        );
    }

    #[test]
    fn test_negative_end_is_rejected() {
        let result = estimate_growth(&GrowthInputs {
            start_count: 100.0,
            end_count: -1.0,
            period_days: 30,
        });
        assert!(result.is_err());
    }
}
