pub mod portfolio_history_service;
pub mod portfolio_validation_service;
