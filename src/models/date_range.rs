use serde::{Deserialize, Serialize};

/// Inclusive bounds on `PricePoint::date`.
///
/// A missing side means "unbounded": each ticker falls back to its own first
/// (or last) available date for that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl DateRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Builds a range from wire values where `0` (or absence) means unbounded.
    /// Returns `None` when neither side is usable.
    pub fn from_wire(start: Option<i64>, end: Option<i64>) -> Option<Self> {
        let start = start.filter(|d| *d != 0);
        let end = end.filter(|d| *d != 0);
        if start.is_none() && end.is_none() {
            return None;
        }
        Some(Self { start, end })
    }

    /// Effective inclusive bounds for a series whose own extremes are `first` and `last`.
    pub fn resolve(&self, first: i64, last: i64) -> (i64, i64) {
        (self.start.unwrap_or(first), self.end.unwrap_or(last))
    }
}
