use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{CalculateHistory, HistoryResponse, Position, ValidatedPortfolio};
use crate::services::{portfolio_history_service, portfolio_validation_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(validate_portfolio))
        .route("/history", post(calculate_history))
}

pub async fn validate_portfolio(
    payload: Result<Json<Vec<Position>>, JsonRejection>,
) -> Result<Json<ValidatedPortfolio>, AppError> {
    let Json(positions) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    info!("POST /portfolio/validate - Validating {} positions", positions.len());

    let positions = portfolio_validation_service::validate(&positions).map_err(|e| {
        error!("Portfolio rejected: {}", e);
        e
    })?;
    let total_weight = portfolio_validation_service::total_weight(&positions);
    Ok(Json(ValidatedPortfolio {
        positions,
        total_weight,
    }))
}

pub async fn calculate_history(
    State(state): State<AppState>,
    payload: Result<Json<CalculateHistory>, JsonRejection>,
) -> Result<Json<HistoryResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    info!(
        "POST /portfolio/history - {} positions, {} histories",
        request.positions.len(),
        request.histories.len()
    );

    let positions = portfolio_validation_service::validate(&request.positions).map_err(|e| {
        error!("Portfolio rejected: {}", e);
        e
    })?;
    let range = portfolio_validation_service::validate_range(request.date_range()).map_err(|e| {
        error!("Date range rejected: {}", e);
        e
    })?;

    let history = portfolio_history_service::build_history(
        &positions,
        &request.histories,
        range,
        state.aggregation,
    );
    info!(
        "Calculated {} portfolio points ({} positions skipped)",
        history.points.len(),
        history.skipped.len()
    );
    Ok(Json(history.into()))
}
