use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use quotedesk_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quotedesk_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing QuoteDesk API...");
    let state = AppState::from_env()?;
    let port = state.config.port;
    let state = Arc::new(state);

    let app = quotedesk_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting QuoteDesk API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
