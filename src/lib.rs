pub mod app;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
mod routes;
pub mod services;
pub mod state;
