use chrono::Utc;
use forecast_core::{
    EngineConfig, ForecastError, ForecastInput, Fundamentals, MarketDataProvider, PricePoint,
    TickerReport,
};
use forecast_engine::ForecastProjector;
use momentum_analysis::MomentumAnalyzer;
use risk_analysis::RiskAggregator;
use std::sync::Arc;

/// Wires the data provider and the three engines into one report per
/// request. Holds no cache and no state between calls; every report is
/// computed fresh from whatever the provider returns.
pub struct ForecastOrchestrator {
    provider: Arc<dyn MarketDataProvider>,
    projector: ForecastProjector,
    momentum: MomentumAnalyzer,
    risk: RiskAggregator,
}

impl ForecastOrchestrator {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    pub fn with_config(provider: Arc<dyn MarketDataProvider>, config: EngineConfig) -> Self {
        Self {
            provider,
            projector: ForecastProjector::with_config(config.clone()),
            momentum: MomentumAnalyzer::with_config(config),
            risk: RiskAggregator::new(),
        }
    }

    /// Fetch market data and compute one report. An unknown ticker
    /// propagates; a failed price-history fetch degrades to an empty
    /// series so the sections that need no history still render.
    pub async fn analyze_ticker(
        &self,
        symbol: &str,
        input: &ForecastInput,
        history_days: u32,
    ) -> Result<TickerReport, ForecastError> {
        let fundamentals = self.provider.fetch_fundamentals(symbol).await?;

        let series = match self.provider.fetch_price_series(symbol, history_days).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "price history unavailable");
                Vec::new()
            }
        };

        Ok(self.build_report(&fundamentals, &series, input))
    }

    /// The sections are independent: a projection failure is recorded on
    /// the report while momentum and risk still compute.
    pub fn build_report(
        &self,
        fundamentals: &Fundamentals,
        series: &[PricePoint],
        input: &ForecastInput,
    ) -> TickerReport {
        let (forecast, forecast_error) = match self.projector.project(fundamentals, series, input) {
            Ok(forecast) => (Some(forecast), None),
            Err(e) => {
                tracing::warn!(symbol = %fundamentals.symbol, error = %e, "projection failed");
                (None, Some(e.to_string()))
            }
        };

        TickerReport {
            symbol: fundamentals.symbol.clone(),
            name: fundamentals.name.clone(),
            sector: fundamentals.sector.clone(),
            timestamp: Utc::now(),
            forecast,
            forecast_error,
            momentum: self.momentum.analyze(series),
            risk: self.risk.aggregate(fundamentals),
        }
    }
}
