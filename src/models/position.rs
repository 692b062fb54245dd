use serde::{Deserialize, Serialize};

// A portfolio line item: a ticker and the percentage of the portfolio it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub weight: f64,
}

impl Position {
    pub fn new(ticker: impl Into<String>, weight: f64) -> Self {
        Self {
            ticker: ticker.into(),
            weight,
        }
    }
}
