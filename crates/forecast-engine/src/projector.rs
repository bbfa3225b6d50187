use crate::growth::GrowthEstimator;
use crate::math::{round2, round4};
use crate::normalizer::YieldNormalizer;
use forecast_core::{
    EngineConfig, ForecastError, ForecastInput, ForecastResult, Fundamentals, PricePoint,
};

/// Runs the full term projection: normalize the dividend, pick a growth
/// rate, then step the holding through the term with or without
/// reinvestment. Pure and stateless; safe to call from any thread.
pub struct ForecastProjector {
    config: EngineConfig,
    normalizer: YieldNormalizer,
    estimator: GrowthEstimator,
}

impl ForecastProjector {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let normalizer = YieldNormalizer::with_cap(config.yield_cap);
        Self {
            config,
            normalizer,
            estimator: GrowthEstimator::new(),
        }
    }

    /// The only hard failure is a non-positive price with no growth
    /// override: shares per dollar are undefined and there is nothing to
    /// project. Every other degenerate input (zero dividend, zero amount,
    /// zero term, empty series) degrades to zero-valued fields.
    pub fn project(
        &self,
        fundamentals: &Fundamentals,
        series: &[PricePoint],
        input: &ForecastInput,
    ) -> Result<ForecastResult, ForecastError> {
        let price = fundamentals.price.unwrap_or(0.0);

        if price <= 0.0 {
            return match input.growth_rate_override_percent {
                Some(growth) => Ok(Self::degenerate(growth)),
                None => Err(ForecastError::InvalidPrice(format!(
                    "no usable price for {}",
                    fundamentals.symbol
                ))),
            };
        }

        let dividend = self.normalizer.normalize(
            fundamentals.price,
            fundamentals.dividend_rate,
            fundamentals.dividend_yield,
        );

        let growth = input
            .growth_rate_override_percent
            .unwrap_or_else(|| self.estimator.estimate_cagr(series));

        let shares0 = input.amount_invested / price;
        let annual_dividend = shares0 * dividend.rate;
        let term = f64::from(input.term_years);

        let future_price = price * (1.0 + growth / 100.0).powi(input.term_years as i32);

        // DRIP reinvests each year's per-share dividend at the current,
        // non-escalated price. The total over the term is reported from the
        // final share count, an approximation kept from the published
        // calculator.
        let (final_shares, total_dividends) = if input.drip {
            let mut shares = shares0;
            for _ in 0..input.term_years {
                shares += shares * dividend.rate / price;
            }
            (shares, shares * dividend.rate * term)
        } else {
            (shares0, annual_dividend * term)
        };

        tracing::debug!(
            symbol = %fundamentals.symbol,
            growth_percent = growth,
            drip = input.drip,
            "projected {} shares over {} years",
            final_shares,
            input.term_years
        );

        Ok(ForecastResult {
            current_price: round2(price),
            normalized_dividend_rate: round2(dividend.rate),
            normalized_dividend_yield: round4(dividend.yield_fraction),
            yield_was_capped: dividend.was_capped,
            estimated_shares: round4(final_shares),
            annual_dividend_income: round2(annual_dividend),
            daily_income: round2(annual_dividend / self.config.days_per_year),
            weekly_income: round2(annual_dividend / self.config.weeks_per_year),
            monthly_income: round2(annual_dividend / self.config.months_per_year),
            growth_rate_percent_used: round2(growth),
            future_price_estimate: round2(future_price),
            total_dividends_over_term: round2(total_dividends),
            projected_asset_value: round2(final_shares * future_price),
        })
    }

    /// Zero-valued forecast for a priceless security with a caller-supplied
    /// growth rate: no shares can be estimated, but the request is valid.
    fn degenerate(growth: f64) -> ForecastResult {
        ForecastResult {
            current_price: 0.0,
            normalized_dividend_rate: 0.0,
            normalized_dividend_yield: 0.0,
            yield_was_capped: false,
            estimated_shares: 0.0,
            annual_dividend_income: 0.0,
            daily_income: 0.0,
            weekly_income: 0.0,
            monthly_income: 0.0,
            growth_rate_percent_used: round2(growth),
            future_price_estimate: 0.0,
            total_dividends_over_term: 0.0,
            projected_asset_value: 0.0,
        }
    }
}

impl Default for ForecastProjector {
    fn default() -> Self {
        Self::new()
    }
}
