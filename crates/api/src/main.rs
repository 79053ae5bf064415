use std::sync::Arc;

use anyhow::Context;

use agora_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agora_observability::init();

    let config = AppConfig::from_env()?;

    // A bad definition must stop us before we accept traffic.
    let metadata = config
        .load_metadata()
        .context("failed to load category metadata")?;

    let app = agora_api::app::build_app(Arc::new(metadata), config.moderation_api_key);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
