use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),
}
