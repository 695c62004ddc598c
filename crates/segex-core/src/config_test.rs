use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("AIRTABLE_API_KEY", "test-key");
    m.insert("AIRTABLE_BASE_ID", "appTestBase");
    m.insert("AIRTABLE_TABLE_ID", "tblTestTable");
    m
}

#[test]
fn build_app_config_fails_without_api_key() {
    let mut map = full_env();
    map.remove("AIRTABLE_API_KEY");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "AIRTABLE_API_KEY"),
        "expected MissingEnvVar(AIRTABLE_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_base_id() {
    let mut map = full_env();
    map.remove("AIRTABLE_BASE_ID");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "AIRTABLE_BASE_ID"),
        "expected MissingEnvVar(AIRTABLE_BASE_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_table_id() {
    let mut map = full_env();
    map.remove("AIRTABLE_TABLE_ID");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "AIRTABLE_TABLE_ID"),
        "expected MissingEnvVar(AIRTABLE_TABLE_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.log_level, "info");
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.lookback_days, 30);
    assert_eq!(config.fetch_past_days, 30);
    assert_eq!(config.fetch_future_days, 7);
    assert_eq!(config.fields.naming_key, "fldWn8OEU5wHn6vTp");
    assert_eq!(config.fields.exclusions, "fldZKBTFw4WUEUNqu");
}

#[test]
fn build_app_config_honors_overrides() {
    let mut map = full_env();
    map.insert("SEGEX_LOG_LEVEL", "debug");
    map.insert("SEGEX_LOOKBACK_DAYS", "14");
    map.insert("SEGEX_FETCH_FUTURE_DAYS", "3");
    map.insert("SEGEX_FIELD_EXCLUSIONS", "fldCustom123");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.lookback_days, 14);
    assert_eq!(config.fetch_future_days, 3);
    assert_eq!(config.fields.exclusions, "fldCustom123");
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = full_env();
    map.insert("SEGEX_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SEGEX_REQUEST_TIMEOUT_SECS"
    ));
}

#[test]
fn build_app_config_rejects_negative_lookback() {
    let mut map = full_env();
    map.insert("SEGEX_LOOKBACK_DAYS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SEGEX_LOOKBACK_DAYS"
    ));
}

#[test]
fn app_config_debug_redacts_api_key() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("test-key"));
    assert!(rendered.contains("[redacted]"));
}
