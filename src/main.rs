use std::sync::Arc;

use masala_api::{
    config::Config,
    routes::{create_router, AppState},
    services::providers::tmdb::TmdbProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("masala_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Fails fast when TMDB_API_KEY is absent
    let provider = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    )?);

    let state = AppState::new(provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
