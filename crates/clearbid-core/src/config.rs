use crate::app_config::{AppConfig, GateThresholds};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a threshold value cannot be parsed or is out of range.
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
/// Returns `ConfigError` if a threshold value cannot be parsed or is out of range.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load the env layer of the configuration without range-checking thresholds.
///
/// Callers that merge further overrides on top (the CLI's flags) validate the
/// merged thresholds themselves with [`validate_thresholds`].
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if a threshold value is not a finite number.
pub fn load_unvalidated_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    read_app_config(|key| std::env::var(key))
}

/// Log level from `CLEARBID_LOG_LEVEL`, or `"info"` when unset.
#[must_use]
pub fn log_level_from_env() -> String {
    std::env::var("CLEARBID_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

const DEFAULT_LOG_LEVEL: &str = "info";

/// Build and validate application configuration using the provided env-var
/// lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let config = read_app_config(lookup)?;
    validate_thresholds(&config.thresholds)?;
    Ok(config)
}

/// Parse env values into an `AppConfig`, applying defaults but no range checks.
fn read_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = GateThresholds::default();

    let or_default = |var: &str, default: String| -> String {
        lookup(var).unwrap_or(default)
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be a finite number".to_string(),
            })
        }
    };

    let min_margin = parse_f64("CLEARBID_MIN_MARGIN", defaults.min_margin)?;
    let min_trust = parse_f64("CLEARBID_MIN_TRUST", defaults.min_trust)?;
    let max_logistics_pct = parse_f64("CLEARBID_MAX_LOGISTICS_PCT", defaults.max_logistics_pct)?;
    let destination = or_default("CLEARBID_DEST", defaults.destination);
    let log_level = or_default("CLEARBID_LOG_LEVEL", DEFAULT_LOG_LEVEL.to_string());

    let thresholds = GateThresholds {
        min_margin,
        min_trust,
        max_logistics_pct,
        destination,
    };

    Ok(AppConfig {
        thresholds,
        log_level,
    })
}

/// Check that a set of thresholds is usable by the gates.
///
/// # Errors
///
/// Returns `ConfigError::Validation` naming the first out-of-range field.
pub fn validate_thresholds(thresholds: &GateThresholds) -> Result<(), ConfigError> {
    if !thresholds.min_margin.is_finite() {
        return Err(ConfigError::Validation(
            "min_margin must be a finite number".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&thresholds.min_trust) {
        return Err(ConfigError::Validation(format!(
            "min_trust {} must be within [0, 1]",
            thresholds.min_trust
        )));
    }
    if !thresholds.max_logistics_pct.is_finite() || thresholds.max_logistics_pct < 0.0 {
        return Err(ConfigError::Validation(format!(
            "max_logistics_pct {} must be a non-negative number",
            thresholds.max_logistics_pct
        )));
    }
    if thresholds.destination.trim().is_empty() {
        return Err(ConfigError::Validation(
            "destination must be non-empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
