use forecast_core::{EngineConfig, MomentumSnapshot, PricePoint, Trend};

use crate::indicators::{rsi, sma};

/// Classifies momentum state from the close-price series: RSI against the
/// overbought/oversold thresholds plus short and long moving averages.
pub struct MomentumAnalyzer {
    config: EngineConfig,
}

impl MomentumAnalyzer {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// None below the short-MA window (50 points by default): too little
    /// history for a meaningful read, which callers present as "no signal"
    /// rather than an error. The long MA additionally needs its own window
    /// (200 by default) and is omitted otherwise.
    pub fn analyze(&self, series: &[PricePoint]) -> Option<MomentumSnapshot> {
        if series.len() < self.config.ma_short_period {
            return None;
        }

        let closes: Vec<f64> = series.iter().map(|p| p.close).collect();

        let sma_50 = sma(&closes, self.config.ma_short_period).last().copied()?;
        let sma_200 = if closes.len() >= self.config.ma_long_period {
            sma(&closes, self.config.ma_long_period).last().copied()
        } else {
            None
        };
        let rsi_14 = rsi(&closes, self.config.rsi_period).last().copied()?;

        let trend = if rsi_14 > self.config.rsi_overbought {
            Trend::Overbought
        } else if rsi_14 < self.config.rsi_oversold {
            Trend::Oversold
        } else {
            Trend::Neutral
        };

        Some(MomentumSnapshot {
            current_price: round2(*closes.last()?),
            sma_50: round2(sma_50),
            sma_200: sma_200.map(round2),
            rsi_14: round2(rsi_14),
            trend,
        })
    }
}

impl Default for MomentumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
