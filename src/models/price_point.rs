use serde::{Deserialize, Deserializer, Serialize};

// Represents one daily quote for a given ticker, as supplied by the market-data caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    #[serde(alias = "stock")]
    pub ticker: String,
    pub date: i64,              // day-granularity epoch timestamp
    #[serde(default, deserialize_with = "null_as_zero")]
    pub open: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub high: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub low: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub close: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub volume: f64,
    pub adjusted_close: f64,
}

impl PricePoint {
    /// Quote carrying only what the return calculation reads; OHLC mirror the adjusted close.
    pub fn adjusted(ticker: impl Into<String>, date: i64, adjusted_close: f64) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            open: adjusted_close,
            high: adjusted_close,
            low: adjusted_close,
            close: adjusted_close,
            volume: 0.0,
            adjusted_close,
        }
    }
}

// Feeds publish `null` for OHLCV on some days; only the adjusted close is read.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
