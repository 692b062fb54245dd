use anyhow::Context;
use tokio::net::TcpListener;

use portfolio_simulator::app;
use portfolio_simulator::config::AppConfig;
use portfolio_simulator::logging::{self, LoggingConfig};
use portfolio_simulator::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let config = AppConfig::from_env();
    if config.sort_histories_by_date {
        tracing::info!("📊 Price histories will be sorted by date before aggregation");
    }

    let state = AppState {
        aggregation: config.aggregation_options(),
    };
    let app = app::create_app(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Portfolio simulator backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
