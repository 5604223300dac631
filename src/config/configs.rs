use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn finalize(&mut self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            if cfg!(debug_assertions) {
                self.database.url = defaults::DEFAULT_DATABASE_URL.to_string();
            } else {
                bail!("APP_DATABASE__URL is required in release builds");
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Upper bound for a single store round trip.
    pub request_timeout_secs: u64,
}

impl GeneralConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE,
            connect_timeout_secs: defaults::DEFAULT_DB_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Seeded with the Admin role on startup when both this and `admin_password` are set.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Accept stored passwords that are not argon2 hashes by comparing them verbatim.
    pub allow_plaintext_passwords: bool,
}

impl AuthConfig {
    pub fn admin_seed(&self) -> Option<(&str, &str)> {
        match (self.admin_username.as_deref(), self.admin_password.as_deref()) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: None,
            admin_password: None,
            allow_plaintext_passwords: defaults::DEFAULT_ALLOW_PLAINTEXT_PASSWORDS,
        }
    }
}
