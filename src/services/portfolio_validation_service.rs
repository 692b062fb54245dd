use std::collections::HashSet;

use crate::errors::ValidationError;
use crate::models::{DateRange, Position};

/// Checks a proposed portfolio and returns a copy with tickers normalized to
/// uppercase. The caller's positions are never modified.
///
/// Rules are checked in order and the first failure wins:
/// empty list, then per position (blank ticker, weight outside (0, 100],
/// duplicate ticker), then the weight sum.
pub fn validate(positions: &[Position]) -> Result<Vec<Position>, ValidationError> {
    if positions.is_empty() {
        return Err(ValidationError::EmptyPortfolio);
    }

    let mut seen = HashSet::with_capacity(positions.len());
    let mut normalized = Vec::with_capacity(positions.len());
    let mut total = 0.0_f64;

    for position in positions {
        let ticker = position.ticker.trim();
        if ticker.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        let ticker = ticker.to_uppercase();

        // NaN fails both comparisons
        if !(position.weight > 0.0 && position.weight <= 100.0) {
            return Err(ValidationError::InvalidWeight);
        }

        if !seen.insert(ticker.clone()) {
            return Err(ValidationError::DuplicateTicker(ticker));
        }

        total += position.weight;
        normalized.push(Position::new(ticker, position.weight));
    }

    if round_half_up(total) != 100 {
        return Err(ValidationError::WeightSumMismatch(total));
    }

    Ok(normalized)
}

/// Rejects an explicit range whose start lies after its end.
///
/// Stricter than the aggregator, which treats a range matching no points as a
/// silent no-op: an inverted range is reported rather than yielding an empty
/// series.
pub fn validate_range(range: Option<DateRange>) -> Result<Option<DateRange>, ValidationError> {
    match range {
        Some(DateRange { start: Some(start), end: Some(end) }) if start > end => {
            Err(ValidationError::InvalidDateRange { start, end })
        }
        other => Ok(other),
    }
}

pub fn total_weight(positions: &[Position]) -> f64 {
    positions.iter().map(|p| p.weight).sum()
}

// Weights are positive, so flooring after adding one half rounds half up.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
