use std::sync::Arc;

use cinefind::{
    api::{create_router, AppState},
    config::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinefind=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    // Initial genre + popular load, same as opening the page
    let view = Arc::clone(&state.view);
    tokio::spawn(async move { view.initialize().await });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        catalog = %config.catalog_api_url,
        "Server running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
