mod mysql;
mod postgres;
mod registry;

use std::sync::Arc;

use sea_orm::ConnectOptions;

pub use registry::{DbProvider, DbProviderId, DbProviders, redact_url};

use self::{mysql::MySqlDbProvider, postgres::PostgresDbProvider};
use crate::config::DatabaseConfig;

pub fn default_registry() -> anyhow::Result<DbProviders> {
    DbProviders::new()
        .with_provider(Arc::new(MySqlDbProvider))?
        .with_provider(Arc::new(PostgresDbProvider))
}

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(cfg.connect_timeout())
        .sqlx_logging(false);
    options
}
