use forecast_core::EngineConfig;
use serde::{Deserialize, Serialize};

/// Canonical dividend figures after reconciling rate, yield, and price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDividend {
    /// Annual dividend in dollars per share
    pub rate: f64,
    /// Annual yield as a fraction, clamped to `[0, yield_cap]`
    pub yield_fraction: f64,
    /// The raw yield exceeded the cap and was clamped
    pub was_capped: bool,
}

impl NormalizedDividend {
    fn none() -> Self {
        Self {
            rate: 0.0,
            yield_fraction: 0.0,
            was_capped: false,
        }
    }
}

/// Reconciles the dividend fields a data source reports (rate without
/// yield, yield without rate, neither, or values inconsistent with price)
/// into one canonical pair. All consumers go through this single pass.
pub struct YieldNormalizer {
    yield_cap: f64,
}

impl YieldNormalizer {
    pub fn new() -> Self {
        Self {
            yield_cap: EngineConfig::default().yield_cap,
        }
    }

    pub fn with_cap(yield_cap: f64) -> Self {
        Self { yield_cap }
    }

    /// Always returns a defined triple; "no dividend data" is a valid state,
    /// not an error.
    pub fn normalize(
        &self,
        price: Option<f64>,
        dividend_rate: Option<f64>,
        dividend_yield: Option<f64>,
    ) -> NormalizedDividend {
        let price = price.unwrap_or(0.0);
        let raw_rate = dividend_rate.unwrap_or(0.0);
        let raw_yield = dividend_yield.unwrap_or(0.0);

        if price <= 0.0 || (raw_rate <= 0.0 && raw_yield <= 0.0) {
            return NormalizedDividend::none();
        }

        let (rate, yield_fraction) = if raw_rate <= 0.0 {
            // Rate missing: derive dollars per share from yield
            (price * raw_yield, raw_yield)
        } else if raw_yield <= 0.0 {
            // Yield missing: derive from rate
            (raw_rate, raw_rate / price)
        } else {
            (raw_rate, raw_yield)
        };

        let was_capped = yield_fraction > self.yield_cap;
        if was_capped {
            tracing::warn!(
                raw_yield = yield_fraction,
                cap = self.yield_cap,
                "dividend yield exceeds cap, clamping"
            );
        }
        let yield_fraction = yield_fraction.clamp(0.0, self.yield_cap);

        // A capped yield re-derives the rate so downstream projections see
        // the capped figure, not the raw one
        let rate = if was_capped {
            price * yield_fraction
        } else {
            rate
        };

        NormalizedDividend {
            rate,
            yield_fraction,
            was_capped,
        }
    }
}

impl Default for YieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
