use std::sync::Arc;

use anyhow::Context;

use localshop_api::app::{self, services};
use localshop_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("failed to read configuration")?;
    localshop_observability::init();

    match &config.database_url {
        Some(_) => tracing::info!("DATABASE_URL set but unused; catalog is kept in memory"),
        None => tracing::warn!("DATABASE_URL not set; catalog is kept in memory"),
    }

    let services = Arc::new(services::build_services(&config));
    let _sweeper = services::spawn_notification_sweeper(services.clone(), config.sweep_interval);

    let app = app::build_app(services);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
