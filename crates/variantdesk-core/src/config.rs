use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; defaults mirror [`AppConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_secs = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(secs)
    };

    let log_level = or_default("VARIANTDESK_LOG_LEVEL", &defaults.log_level);
    let request_timeout_secs = parse_secs(
        "VARIANTDESK_REQUEST_TIMEOUT_SECS",
        defaults.request_timeout_secs,
    )?;
    let connect_timeout_secs = parse_secs(
        "VARIANTDESK_CONNECT_TIMEOUT_SECS",
        defaults.connect_timeout_secs,
    )?;

    let export_path = match lookup("VARIANTDESK_EXPORT_PATH") {
        Ok(raw) if raw.trim().is_empty() => {
            return Err(ConfigError::InvalidEnvVar {
                var: "VARIANTDESK_EXPORT_PATH".to_string(),
                reason: "must not be empty".to_string(),
            })
        }
        Ok(raw) => PathBuf::from(raw),
        Err(_) => defaults.export_path,
    };

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        connect_timeout_secs,
        export_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
