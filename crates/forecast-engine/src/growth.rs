use crate::math::round2;
use forecast_core::PricePoint;

/// Derives an annualized growth rate (CAGR) from a historical close series.
/// Callers with a manual growth assumption skip this entirely.
pub struct GrowthEstimator;

impl GrowthEstimator {
    pub fn new() -> Self {
        Self
    }

    /// CAGR between the first and last close, as a percent rounded to two
    /// decimals. Fewer than two points, a non-positive elapsed span, or
    /// non-positive closes all return 0.0; insufficient history is a
    /// common, legitimate case, not an error.
    pub fn estimate_cagr(&self, series: &[PricePoint]) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }

        let first = &series[0];
        let last = &series[series.len() - 1];

        let years = (last.timestamp - first.timestamp).num_days() as f64 / 365.0;
        if years <= 0.0 || first.close <= 0.0 || last.close <= 0.0 {
            return 0.0;
        }

        let cagr = (last.close / first.close).powf(1.0 / years) - 1.0;
        round2(cagr * 100.0)
    }
}

impl Default for GrowthEstimator {
    fn default() -> Self {
        Self::new()
    }
}
