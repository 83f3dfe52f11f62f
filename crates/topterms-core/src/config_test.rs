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

#[test]
fn build_app_config_all_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.read_buffer_bytes, 1_048_576);
    assert_eq!(cfg.progress_interval, 10_000);
}

#[test]
fn build_app_config_log_level_override() {
    let mut map = HashMap::new();
    map.insert("TOPTERMS_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn build_app_config_read_buffer_bytes_override() {
    let mut map = HashMap::new();
    map.insert("TOPTERMS_READ_BUFFER_BYTES", "65536");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.read_buffer_bytes, 65_536);
}

#[test]
fn build_app_config_read_buffer_bytes_invalid() {
    let mut map = HashMap::new();
    map.insert("TOPTERMS_READ_BUFFER_BYTES", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TOPTERMS_READ_BUFFER_BYTES"),
        "expected InvalidEnvVar(TOPTERMS_READ_BUFFER_BYTES), got: {result:?}"
    );
}

#[test]
fn build_app_config_read_buffer_bytes_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("TOPTERMS_READ_BUFFER_BYTES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TOPTERMS_READ_BUFFER_BYTES"),
        "expected InvalidEnvVar(TOPTERMS_READ_BUFFER_BYTES), got: {result:?}"
    );
}

#[test]
fn build_app_config_progress_interval_override() {
    let mut map = HashMap::new();
    map.insert("TOPTERMS_PROGRESS_INTERVAL", "500");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.progress_interval, 500);
}

#[test]
fn build_app_config_progress_interval_invalid() {
    let mut map = HashMap::new();
    map.insert("TOPTERMS_PROGRESS_INTERVAL", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TOPTERMS_PROGRESS_INTERVAL"),
        "expected InvalidEnvVar(TOPTERMS_PROGRESS_INTERVAL), got: {result:?}"
    );
}

#[test]
fn build_app_config_progress_interval_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("TOPTERMS_PROGRESS_INTERVAL", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TOPTERMS_PROGRESS_INTERVAL"),
        "expected InvalidEnvVar(TOPTERMS_PROGRESS_INTERVAL), got: {result:?}"
    );
}
