mod position;
mod price_point;
mod date_range;
mod portfolio_history;
mod portfolio_request;

pub use position::Position;
pub use price_point::PricePoint;
pub use date_range::DateRange;
pub use portfolio_history::{
    HistoryMeta, HistoryResponse, PortfolioHistory, PortfolioPoint, SkipReason, SkippedPosition,
};
pub use portfolio_request::{CalculateHistory, ValidatedPortfolio};
