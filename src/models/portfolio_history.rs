use serde::{Deserialize, Serialize};

/// One date of the consolidated portfolio series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPoint {
    pub date: i64,
    pub percent_variation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoMatchingHistory,
    EmptyRange,
    UnusableBaseline,
}

/// A position that contributed nothing to the series, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPosition {
    pub ticker: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHistory {
    pub points: Vec<PortfolioPoint>,
    pub skipped: Vec<SkippedPosition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMeta {
    pub points: usize,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub skipped: Vec<SkippedPosition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<PortfolioPoint>,
    pub meta: HistoryMeta,
}

impl From<PortfolioHistory> for HistoryResponse {
    fn from(value: PortfolioHistory) -> Self {
        let meta = HistoryMeta {
            points: value.points.len(),
            start: value.points.first().map(|p| p.date),
            end: value.points.last().map(|p| p.date),
            skipped: value.skipped,
        };
        Self {
            history: value.points,
            meta,
        }
    }
}
