use serde::{Deserialize, Serialize};

/// Tunable engine parameters. Defaults match the published calculator
/// behavior; tests exercise the boundaries by overriding individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ceiling on normalized dividend yield (fraction). Stale or
    /// misclassified source data can report absurd annualized yields;
    /// values above the cap are clamped, not rejected.
    pub yield_cap: f64,
    pub rsi_period: usize,
    pub ma_short_period: usize,
    pub ma_long_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    /// Divisors for deriving daily/weekly/monthly income from annual income
    pub days_per_year: f64,
    pub weeks_per_year: f64,
    pub months_per_year: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            yield_cap: 0.20,
            rsi_period: 14,
            ma_short_period: 50,
            ma_long_period: 200,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            days_per_year: 365.0,
            weeks_per_year: 52.0,
            months_per_year: 12.0,
        }
    }
}
