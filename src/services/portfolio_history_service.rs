use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::models::{
    DateRange, PortfolioHistory, PortfolioPoint, Position, PricePoint, SkipReason, SkippedPosition,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationOptions {
    /// Sort each matched series by date before deriving bounds and the baseline.
    /// Off by default: the series is used in the order the caller supplied it.
    pub sort_by_date: bool,
}

/// Consolidated daily percentage variation of a portfolio.
///
/// Positions are expected to have passed validation already. A position whose
/// ticker has no history, or whose history has nothing inside the range,
/// simply contributes nothing.
pub fn aggregate(
    positions: &[Position],
    histories: &[Vec<PricePoint>],
    range: Option<DateRange>,
) -> Vec<PortfolioPoint> {
    build_history(positions, histories, range, AggregationOptions::default()).points
}

/// Same as [`aggregate`], but also reports which positions were left out and why.
pub fn build_history(
    positions: &[Position],
    histories: &[Vec<PricePoint>],
    range: Option<DateRange>,
    options: AggregationOptions,
) -> PortfolioHistory {
    let index = HistoryIndex::new(histories);
    let range = range.unwrap_or_default();

    let mut by_date: BTreeMap<i64, f64> = BTreeMap::new();
    let mut skipped = Vec::new();

    for position in positions {
        let contributions = index
            .get(&position.ticker)
            .ok_or(SkipReason::NoMatchingHistory)
            .and_then(|series| weighted_variations(position, series, range, options));

        match contributions {
            Ok(contributions) => {
                for (date, variation) in contributions {
                    *by_date.entry(date).or_insert(0.0) += variation;
                }
            }
            Err(reason) => {
                match reason {
                    SkipReason::NoMatchingHistory => {
                        warn!("No price history supplied for {}, skipping position", position.ticker)
                    }
                    _ => debug!("Position {} contributes nothing: {:?}", position.ticker, reason),
                }
                skipped.push(SkippedPosition {
                    ticker: position.ticker.clone(),
                    reason,
                });
            }
        }
    }

    let points = by_date
        .into_iter()
        .map(|(date, percent_variation)| PortfolioPoint {
            date,
            percent_variation,
        })
        .collect();

    PortfolioHistory { points, skipped }
}

/// Ticker → series lookup. A series belongs to the ticker of its first point;
/// empty series are not indexed and the first series seen for a ticker wins.
struct HistoryIndex<'a> {
    by_ticker: HashMap<&'a str, &'a [PricePoint]>,
}

impl<'a> HistoryIndex<'a> {
    fn new(histories: &'a [Vec<PricePoint>]) -> Self {
        let mut by_ticker = HashMap::with_capacity(histories.len());
        for series in histories {
            if let Some(first) = series.first() {
                by_ticker
                    .entry(first.ticker.as_str())
                    .or_insert(series.as_slice());
            }
        }
        Self { by_ticker }
    }

    fn get(&self, ticker: &str) -> Option<&'a [PricePoint]> {
        self.by_ticker.get(ticker).copied()
    }
}

/// `(date, weighted variation)` for every in-range point of one position,
/// relative to the first in-range adjusted close.
fn weighted_variations(
    position: &Position,
    series: &[PricePoint],
    range: DateRange,
    options: AggregationOptions,
) -> Result<Vec<(i64, f64)>, SkipReason> {
    let series: Cow<'_, [PricePoint]> = if options.sort_by_date {
        let mut sorted = series.to_vec();
        sorted.sort_by_key(|p| p.date);
        Cow::Owned(sorted)
    } else {
        Cow::Borrowed(series)
    };

    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Err(SkipReason::EmptyRange),
    };
    let (lower, upper) = range.resolve(first, last);

    let in_range: Vec<&PricePoint> = series
        .iter()
        .filter(|p| p.date >= lower && p.date <= upper)
        .collect();

    let baseline = in_range
        .first()
        .map(|p| p.adjusted_close)
        .ok_or(SkipReason::EmptyRange)?;
    if baseline == 0.0 || !baseline.is_finite() {
        return Err(SkipReason::UnusableBaseline);
    }

    let weight = position.weight / 100.0;
    Ok(in_range
        .into_iter()
        .map(|p| (p.date, ((p.adjusted_close / baseline) - 1.0) * 100.0 * weight))
        .collect())
}
