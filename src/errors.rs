use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Problems with a caller-supplied portfolio. All of them are input errors and
/// deterministic; none is worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("the position list cannot be empty")]
    EmptyPortfolio,
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("weight must be greater than 0 and at most 100")]
    InvalidWeight,
    #[error("duplicate positions are not allowed: {0}")]
    DuplicateTicker(String),
    #[error("weights must sum to 100% (current: {0:.2})")]
    WeightSumMismatch(f64),
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: i64, end: i64 },
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyPortfolio => "empty_portfolio",
            ValidationError::EmptyTicker => "empty_ticker",
            ValidationError::InvalidWeight => "invalid_weight",
            ValidationError::DuplicateTicker(_) => "duplicate_ticker",
            ValidationError::WeightSumMismatch(_) => "weight_sum_mismatch",
            ValidationError::InvalidDateRange { .. } => "invalid_date_range",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(e) => e.kind(),
            AppError::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(e) => e.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
        };
        let body = json!({ "error": message, "kind": self.kind() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_sum_message_uses_two_decimals() {
        let err = ValidationError::WeightSumMismatch(87.5);
        assert_eq!(err.to_string(), "weights must sum to 100% (current: 87.50)");
    }

    #[test]
    fn test_validation_maps_to_unprocessable_entity() {
        let err = AppError::from(ValidationError::EmptyTicker);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "empty_ticker");
    }
}
