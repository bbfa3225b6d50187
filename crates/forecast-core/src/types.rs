use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily closing price
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Current fundamentals for a single security. Every field the data source
/// may or may not supply is Optional; consumers never assume rate and yield
/// are present together or consistent with price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fundamentals {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    pub price: Option<f64>,
    /// Annual dividend in dollars per share
    pub dividend_rate: Option<f64>,
    /// Annual dividend yield as a fraction of price
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub beta: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    /// 52-week price change as a fraction (0.15 = +15%)
    pub fifty_two_week_change: Option<f64>,
}

/// Caller-supplied projection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastInput {
    pub amount_invested: f64,
    pub term_years: u32,
    /// Reinvest dividends into additional shares each year
    pub drip: bool,
    /// Annual growth percent; when set, CAGR estimation is skipped
    pub growth_rate_override_percent: Option<f64>,
}

/// Full projection output. Monetary fields are rounded to 2 decimals,
/// share counts to 4; all values are non-negative and finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub current_price: f64,
    pub normalized_dividend_rate: f64,
    pub normalized_dividend_yield: f64,
    pub yield_was_capped: bool,
    pub estimated_shares: f64,
    pub annual_dividend_income: f64,
    pub daily_income: f64,
    pub weekly_income: f64,
    pub monthly_income: f64,
    pub growth_rate_percent_used: f64,
    pub future_price_estimate: f64,
    pub total_dividends_over_term: f64,
    pub projected_asset_value: f64,
}

/// Momentum state classified from RSI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Overbought,
    Oversold,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Overbought => "Overbought",
            Trend::Oversold => "Oversold",
            Trend::Neutral => "Neutral",
        }
    }
}

/// Momentum indicators from the close-price series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    pub current_price: f64,
    pub sma_50: f64,
    /// Only present with at least 200 closes
    pub sma_200: Option<f64>,
    pub rsi_14: f64,
    pub trend: Trend,
}

/// Risk indicators passed through from fundamentals; absent fields are 0.0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskSnapshot {
    pub beta: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub fifty_two_week_change_percent: f64,
}

/// Combined per-ticker report. Each section is computed independently;
/// a failed projection still leaves momentum and risk populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerReport {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub forecast: Option<ForecastResult>,
    #[serde(default)]
    pub forecast_error: Option<String>,
    pub momentum: Option<MomentumSnapshot>,
    pub risk: RiskSnapshot,
}
