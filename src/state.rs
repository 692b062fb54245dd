use crate::services::portfolio_history_service::AggregationOptions;

#[derive(Clone, Default)]
pub struct AppState {
    pub aggregation: AggregationOptions,
}
