use forecast_core::{Fundamentals, RiskSnapshot};

/// Packages beta and the 52-week range/change into a normalized snapshot.
/// Source fundamentals are frequently incomplete, so every absent field
/// defaults to 0.0 and there is no failure mode.
pub struct RiskAggregator;

impl RiskAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, fundamentals: &Fundamentals) -> RiskSnapshot {
        RiskSnapshot {
            beta: round2(fundamentals.beta.unwrap_or(0.0)),
            fifty_two_week_high: round2(fundamentals.fifty_two_week_high.unwrap_or(0.0)),
            fifty_two_week_low: round2(fundamentals.fifty_two_week_low.unwrap_or(0.0)),
            // Source reports the change as a fraction; the snapshot carries
            // a percentage
            fifty_two_week_change_percent: round2(
                fundamentals.fifty_two_week_change.unwrap_or(0.0) * 100.0,
            ),
        }
    }
}

impl Default for RiskAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_missing_yields_zero_snapshot() {
        let snapshot = RiskAggregator::new().aggregate(&Fundamentals::default());
        assert_eq!(snapshot, RiskSnapshot::default());
    }

    #[test]
    fn fields_pass_through_rounded() {
        let fundamentals = Fundamentals {
            symbol: "TEST".to_string(),
            beta: Some(1.234567),
            fifty_two_week_high: Some(199.0),
            fifty_two_week_low: Some(101.0),
            fifty_two_week_change: Some(0.15678),
            ..Default::default()
        };

        let snapshot = RiskAggregator::new().aggregate(&fundamentals);
        assert_eq!(snapshot.beta, 1.23);
        assert_eq!(snapshot.fifty_two_week_high, 199.0);
        assert_eq!(snapshot.fifty_two_week_low, 101.0);
        assert!((snapshot.fifty_two_week_change_percent - 15.68).abs() < 1e-9);
    }

    #[test]
    fn partial_fundamentals_default_remaining_fields() {
        let fundamentals = Fundamentals {
            symbol: "TEST".to_string(),
            beta: Some(0.85),
            ..Default::default()
        };

        let snapshot = RiskAggregator::new().aggregate(&fundamentals);
        assert_eq!(snapshot.beta, 0.85);
        assert_eq!(snapshot.fifty_two_week_high, 0.0);
        assert_eq!(snapshot.fifty_two_week_change_percent, 0.0);
    }
}
