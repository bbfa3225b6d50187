use crate::{ForecastError, Fundamentals, PricePoint};
use async_trait::async_trait;

/// Capability interface for the data-retrieval layer. The engines never
/// call it directly; callers fetch, then hand plain records to the engines.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, ForecastError>;

    /// Daily closes covering roughly the trailing `days` calendar days,
    /// oldest first. May return fewer points than requested.
    async fn fetch_price_series(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, ForecastError>;
}
