use serde::{Deserialize, Serialize};

/// Decision thresholds handed to the gate pipeline.
///
/// Every pipeline run receives these explicitly; nothing in the gates reads
/// process-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateThresholds {
    /// Minimum projected margin (as a fraction of ask price) for the economic gate.
    pub min_margin: f64,
    /// Minimum seller trust score in `[0, 1]` for the source gate.
    pub min_trust: f64,
    /// Maximum logistics cost as a fraction of ask price for the shipping gate.
    pub max_logistics_pct: f64,
    /// Buyer destination, freeform (`"Singapore"`) or a two-letter code (`"GB"`).
    pub destination: String,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            min_margin: 0.20,
            min_trust: 0.60,
            max_logistics_pct: 0.35,
            destination: "GB".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub thresholds: GateThresholds,
    pub log_level: String,
}
