use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use forecast_core::{ForecastError, Fundamentals, MarketDataProvider, PricePoint};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.polygon.io";

/// Async Polygon.io client. Maps the handful of endpoints the calculator
/// needs (previous close, ticker overview, dividends, daily aggregates)
/// into the engine's plain records. Missing optional data becomes `None`
/// fields; only an unknown ticker or a transport fault is an error.
#[derive(Clone)]
pub struct PolygonClient {
    api_key: String,
    client: Client,
}

impl PolygonClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_key, client }
    }

    /// GET with one automatic retry after a 429, the free tier's throttle
    /// response.
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, ForecastError> {
        for attempt in 0..2u32 {
            let response = self
                .client
                .get(url)
                .query(query)
                .query(&[("apiKey", self.api_key.as_str())])
                .send()
                .await
                .map_err(|e| ForecastError::ApiError(e.to_string()))?;

            if response.status().as_u16() == 429 && attempt == 0 {
                tracing::debug!("rate limited by Polygon, retrying in 15s");
                tokio::time::sleep(std::time::Duration::from_secs(15)).await;
                continue;
            }
            return Ok(response);
        }
        Err(ForecastError::ApiError(
            "rate limited by Polygon after retry".to_string(),
        ))
    }

    /// Previous-session closing price
    pub async fn get_previous_close(&self, symbol: &str) -> Result<Option<f64>, ForecastError> {
        let url = format!("{}/v2/aggs/ticker/{}/prev", BASE_URL, symbol);
        let response = self.get(&url, &[("adjusted", "true".to_string())]).await?;

        if response.status().as_u16() == 404 {
            return Err(ForecastError::TickerNotFound(symbol.to_string()));
        }
        if !response.status().is_success() {
            return Err(ForecastError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let prev: AggregateResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::ApiError(e.to_string()))?;

        Ok(prev.results.first().map(|bar| bar.c))
    }

    /// Company name and sector from the ticker overview
    pub async fn get_ticker_overview(&self, symbol: &str) -> Result<TickerOverview, ForecastError> {
        let url = format!("{}/v3/reference/tickers/{}", BASE_URL, symbol);
        let response = self.get(&url, &[]).await?;

        if response.status().as_u16() == 404 {
            return Err(ForecastError::TickerNotFound(symbol.to_string()));
        }
        if !response.status().is_success() {
            return Err(ForecastError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let overview: TickerOverviewResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::ApiError(e.to_string()))?;

        Ok(overview.results)
    }

    /// Recent dividend records, newest first. Dividend data sits behind a
    /// paid plan; a 401/403 degrades to an empty list rather than failing
    /// the whole fetch.
    pub async fn get_dividends(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<DividendRecord>, ForecastError> {
        let url = format!("{}/v3/reference/dividends", BASE_URL);
        let response = self
            .get(
                &url,
                &[
                    ("ticker", symbol.to_string()),
                    ("limit", limit.to_string()),
                    ("order", "desc".to_string()),
                ],
            )
            .await?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            tracing::debug!(symbol, "dividend endpoint not available on this plan");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(ForecastError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let dividends: DividendResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::ApiError(e.to_string()))?;

        Ok(dividends.results)
    }

    /// Daily closes for the trailing `days` calendar days, oldest first
    pub async fn get_daily_closes(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, ForecastError> {
        let to = Utc::now();
        let from = to - Duration::days(i64::from(days));
        let url = format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}",
            BASE_URL,
            symbol,
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        );

        let response = self.get(&url, &[("adjusted", "true".to_string())]).await?;

        if !response.status().is_success() {
            return Err(ForecastError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let aggs: AggregateResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::ApiError(e.to_string()))?;

        Ok(aggs
            .results
            .into_iter()
            .filter_map(|bar| {
                DateTime::from_timestamp_millis(bar.t).map(|timestamp| PricePoint {
                    timestamp,
                    close: bar.c,
                })
            })
            .collect())
    }
}

/// Annual dollars per share implied by the latest dividend payment.
/// Polygon's `frequency` is payments per year; a missing or one-time
/// frequency counts as a single annual payment.
fn annualize_dividend(cash_amount: f64, frequency: Option<i32>) -> f64 {
    match frequency {
        Some(f) if f > 0 => cash_amount * f64::from(f),
        _ => cash_amount,
    }
}

fn fifty_two_week_stats(series: &[PricePoint]) -> (Option<f64>, Option<f64>, Option<f64>) {
    if series.is_empty() {
        return (None, None, None);
    }

    let high = series
        .iter()
        .map(|p| p.close)
        .fold(f64::NEG_INFINITY, f64::max);
    let low = series.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);

    let first = series[0].close;
    let last = series[series.len() - 1].close;
    let change = if first > 0.0 {
        Some((last - first) / first)
    } else {
        None
    };

    (Some(high), Some(low), change)
}

#[async_trait]
impl MarketDataProvider for PolygonClient {
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, ForecastError> {
        let price = self.get_previous_close(symbol).await?;
        let overview = self.get_ticker_overview(symbol).await?;
        let dividends = self.get_dividends(symbol, 1).await.unwrap_or_default();

        let dividend_rate = dividends
            .first()
            .and_then(|d| d.cash_amount.map(|amount| annualize_dividend(amount, d.frequency)));

        let dividend_yield = match (dividend_rate, price) {
            (Some(rate), Some(p)) if p > 0.0 => Some(rate / p),
            _ => None,
        };

        // These endpoints carry no beta or 52-week stats; derive the range
        // from a year of closes and leave beta absent.
        let year = self.get_daily_closes(symbol, 365).await.unwrap_or_default();
        let (high, low, change) = fifty_two_week_stats(&year);

        Ok(Fundamentals {
            symbol: symbol.to_string(),
            name: Some(overview.name),
            sector: overview.sic_description,
            price,
            dividend_rate,
            dividend_yield,
            payout_ratio: None,
            beta: None,
            fifty_two_week_high: high,
            fifty_two_week_low: low,
            fifty_two_week_change: change,
        })
    }

    async fn fetch_price_series(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, ForecastError> {
        self.get_daily_closes(symbol, days).await
    }
}

// Response types

#[derive(Debug, Deserialize)]
struct AggregateResponse {
    #[serde(default)]
    results: Vec<AggregateBar>,
}

#[derive(Debug, Deserialize)]
struct AggregateBar {
    t: i64,
    c: f64,
}

#[derive(Debug, Deserialize)]
struct TickerOverviewResponse {
    results: TickerOverview,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickerOverview {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub sic_description: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DividendResponse {
    #[serde(default)]
    results: Vec<DividendRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DividendRecord {
    pub cash_amount: Option<f64>,
    pub ex_dividend_date: Option<String>,
    pub pay_date: Option<String>,
    /// Payments per year: 1, 2, 4, 12; 0 for one-time specials
    pub frequency: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn annualize_by_payment_frequency() {
        assert_eq!(annualize_dividend(0.25, Some(4)), 1.0);
        assert!((annualize_dividend(0.10, Some(12)) - 1.2).abs() < 1e-9);
        assert_eq!(annualize_dividend(2.0, Some(1)), 2.0);
        // One-time specials and unknown frequency count once
        assert_eq!(annualize_dividend(3.0, Some(0)), 3.0);
        assert_eq!(annualize_dividend(3.0, None), 3.0);
    }

    #[test]
    fn fifty_two_week_stats_from_series() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let series: Vec<PricePoint> = [100.0, 140.0, 90.0, 120.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                timestamp: base + Duration::days(i as i64 * 90),
                close,
            })
            .collect();

        let (high, low, change) = fifty_two_week_stats(&series);
        assert_eq!(high, Some(140.0));
        assert_eq!(low, Some(90.0));
        assert_eq!(change, Some(0.2));
    }

    #[test]
    fn fifty_two_week_stats_empty_series() {
        assert_eq!(fifty_two_week_stats(&[]), (None, None, None));
    }
}
