use thiserror::Error;

use crate::app_config::{AppConfig, FieldMap};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_days = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        let days = raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if days < 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("day count must be non-negative, got {days}"),
            });
        }
        Ok(days)
    };

    let airtable_api_key = require("AIRTABLE_API_KEY")?;
    let airtable_base_id = require("AIRTABLE_BASE_ID")?;
    let airtable_table_id = require("AIRTABLE_TABLE_ID")?;

    let log_level = or_default("SEGEX_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SEGEX_REQUEST_TIMEOUT_SECS", "30")?;

    let lookback_days = parse_days("SEGEX_LOOKBACK_DAYS", "30")?;
    let fetch_past_days = parse_days("SEGEX_FETCH_PAST_DAYS", "30")?;
    let fetch_future_days = parse_days("SEGEX_FETCH_FUTURE_DAYS", "7")?;

    // Defaults are the production base's field ids.
    let fields = FieldMap {
        naming_key: or_default("SEGEX_FIELD_NAMING_KEY", "fldWn8OEU5wHn6vTp"),
        channel: or_default("SEGEX_FIELD_CHANNEL", "fldcuNtXu0SrpLWp9"),
        identifier: or_default("SEGEX_FIELD_IDENTIFIER", "fld4a3LGvXkHf19y2"),
        start_date: or_default("SEGEX_FIELD_START_DATE", "fldmBjc5EfDFOZPZp"),
        exclusions: or_default("SEGEX_FIELD_EXCLUSIONS", "fldZKBTFw4WUEUNqu"),
    };

    Ok(AppConfig {
        airtable_api_key,
        airtable_base_id,
        airtable_table_id,
        log_level,
        request_timeout_secs,
        lookback_days,
        fetch_past_days,
        fetch_future_days,
        fields,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
