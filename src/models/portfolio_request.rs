use serde::{Deserialize, Serialize};

use super::{DateRange, Position, PricePoint};

/// Body of `POST /api/portfolio/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateHistory {
    pub positions: Vec<Position>,
    #[serde(default)]
    pub histories: Vec<Vec<PricePoint>>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

impl CalculateHistory {
    pub fn date_range(&self) -> Option<DateRange> {
        DateRange::from_wire(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedPortfolio {
    pub positions: Vec<Position>,
    pub total_weight: f64,
}
