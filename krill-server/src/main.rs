//! krill-server — group-purchase campaign coordination service
//!
//! Long-running service that:
//! - Lets an organizer define time-bounded campaigns with item catalogs
//! - Accepts and revises customer quantity submissions while a campaign
//!   is open and inside its order window
//! - Serves per-item totals, per-customer totals, buyer rosters and a
//!   CSV detail export, all derived fresh from line-item state

use krill_server::api;
use krill_server::config::Config;
use krill_server::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "krill_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting krill-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("krill-server listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
