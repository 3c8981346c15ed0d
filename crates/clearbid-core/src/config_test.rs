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
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.thresholds, GateThresholds::default());
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn default_thresholds_match_documented_values() {
    let t = GateThresholds::default();
    assert!((t.min_margin - 0.20).abs() < f64::EPSILON);
    assert!((t.min_trust - 0.60).abs() < f64::EPSILON);
    assert!((t.max_logistics_pct - 0.35).abs() < f64::EPSILON);
    assert_eq!(t.destination, "GB");
}

#[test]
fn min_margin_override() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_MIN_MARGIN", "0.3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.thresholds.min_margin - 0.3).abs() < f64::EPSILON);
}

#[test]
fn min_margin_invalid() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_MIN_MARGIN", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CLEARBID_MIN_MARGIN"),
        "expected InvalidEnvVar(CLEARBID_MIN_MARGIN), got: {result:?}"
    );
}

#[test]
fn min_margin_rejects_nan() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_MIN_MARGIN", "NaN");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CLEARBID_MIN_MARGIN"),
        "expected InvalidEnvVar(CLEARBID_MIN_MARGIN), got: {result:?}"
    );
}

#[test]
fn min_trust_out_of_range_fails_validation() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_MIN_TRUST", "1.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("min_trust")),
        "expected Validation(min_trust), got: {result:?}"
    );
}

#[test]
fn max_logistics_pct_negative_fails_validation() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_MAX_LOGISTICS_PCT", "-0.1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("max_logistics_pct")),
        "expected Validation(max_logistics_pct), got: {result:?}"
    );
}

#[test]
fn destination_and_log_level_override() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_DEST", "Singapore");
    map.insert("CLEARBID_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.thresholds.destination, "Singapore");
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn blank_destination_fails_validation() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_DEST", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("destination")),
        "expected Validation(destination), got: {result:?}"
    );
}

#[test]
fn read_app_config_keeps_out_of_range_values_for_later_override() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_MIN_TRUST", "5");
    let cfg = read_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.thresholds.min_trust - 5.0).abs() < f64::EPSILON);
    assert!(validate_thresholds(&cfg.thresholds).is_err());
}

#[test]
fn read_app_config_still_rejects_unparseable_values() {
    let mut map = HashMap::new();
    map.insert("CLEARBID_MIN_TRUST", "high");
    let result = read_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CLEARBID_MIN_TRUST"),
        "expected InvalidEnvVar(CLEARBID_MIN_TRUST), got: {result:?}"
    );
}
