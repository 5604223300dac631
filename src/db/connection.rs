use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::{default_registry, redact_url};
use crate::config::DatabaseConfig;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let providers = default_registry()?;
    let provider = providers.provider_for_url(&cfg.url)?;
    info!(
        provider = provider.id().as_str(),
        url = %redact_url(&cfg.url),
        max_connections = cfg.max_connections,
        "connecting to database"
    );

    let db = provider
        .connect(cfg)
        .await
        .with_context(|| format!("could not connect to {}", redact_url(&cfg.url)))?;
    info!("database connection ready");
    Ok(db)
}
