use anyhow::{Result, bail};

use super::AppConfig;

const MIN_ADMIN_PASSWORD_LEN: usize = 8;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.request_timeout_secs == 0 {
        errors.push("general.request_timeout_secs must be > 0".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.database.connect_timeout_secs == 0 {
        errors.push("database.connect_timeout_secs must be > 0".to_string());
    }

    match (
        cfg.auth.admin_username.as_deref(),
        cfg.auth.admin_password.as_deref(),
    ) {
        (Some(username), Some(password)) => {
            if username.trim().is_empty() {
                errors.push("auth.admin_username must not be empty".to_string());
            }
            if password.len() < MIN_ADMIN_PASSWORD_LEN {
                errors.push(format!(
                    "auth.admin_password must be at least {MIN_ADMIN_PASSWORD_LEN} characters"
                ));
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            errors.push(
                "auth.admin_username and auth.admin_password must be set together".to_string(),
            );
        }
        (None, None) => {}
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
