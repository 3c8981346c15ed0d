//! Gate 2: margin check.
//!
//! `margin = (resale - ask - logistics) / ask`, compared against a minimum.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::format::{pct, usd};
use crate::outcome::{GateKind, GateOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EconomicVerdict {
    Pass,
    MarginTooLow,
    MissingData,
    NegativeMargin,
}

impl EconomicVerdict {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EconomicVerdict::Pass => "PASS",
            EconomicVerdict::MarginTooLow => "MARGIN_TOO_LOW",
            EconomicVerdict::MissingData => "MISSING_DATA",
            EconomicVerdict::NegativeMargin => "NEGATIVE_MARGIN",
        }
    }
}

impl std::fmt::Display for EconomicVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicResult {
    pub verdict: EconomicVerdict,
    pub ask_price: Option<f64>,
    pub estimated_resale: Option<f64>,
    pub estimated_logistics: Option<f64>,
    /// Unrounded margin ratio. `None` when inputs were missing or invalid.
    pub projected_margin: Option<f64>,
    /// `resale - ask - logistics`. `None` alongside `projected_margin`.
    pub net_profit: Option<f64>,
    pub min_margin: f64,
    pub reason: String,
}

impl EconomicResult {
    fn missing(
        ask_price: Option<f64>,
        estimated_resale: Option<f64>,
        min_margin: f64,
        reason: &str,
    ) -> Self {
        Self {
            verdict: EconomicVerdict::MissingData,
            ask_price,
            estimated_resale,
            estimated_logistics: None,
            projected_margin: None,
            net_profit: None,
            min_margin,
            reason: reason.to_string(),
        }
    }
}

impl GateOutcome for EconomicResult {
    fn kind(&self) -> GateKind {
        GateKind::Economic
    }

    fn passed(&self) -> bool {
        self.verdict == EconomicVerdict::Pass
    }

    fn verdict_code(&self) -> &'static str {
        self.verdict.as_str()
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn details(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            ("margin".to_string(), Value::from(self.projected_margin)),
            ("ask".to_string(), Value::from(self.ask_price)),
            ("resale".to_string(), Value::from(self.estimated_resale)),
        ])
    }
}

/// Check whether the projected margin on a listing clears `min_margin`.
///
/// A missing or non-finite price, or a non-positive ask, yields
/// [`EconomicVerdict::MissingData`] with no margin computed.
#[must_use]
pub fn economic_gate(
    ask_price: Option<f64>,
    estimated_resale: Option<f64>,
    estimated_logistics: f64,
    min_margin: f64,
) -> EconomicResult {
    let (Some(ask), Some(resale)) = (ask_price, estimated_resale) else {
        return EconomicResult::missing(
            ask_price,
            estimated_resale,
            min_margin,
            "Missing ask_price or estimated_resale",
        );
    };

    if !ask.is_finite() || !resale.is_finite() || !estimated_logistics.is_finite() {
        return EconomicResult::missing(
            ask_price,
            estimated_resale,
            min_margin,
            "Price inputs must be finite numbers",
        );
    }

    if ask <= 0.0 {
        return EconomicResult::missing(
            ask_price,
            estimated_resale,
            min_margin,
            "Ask price must be positive",
        );
    }

    let net_profit = resale - ask - estimated_logistics;
    let margin = net_profit / ask;

    let (verdict, reason) = if margin < 0.0 {
        (
            EconomicVerdict::NegativeMargin,
            format!(
                "Negative margin: {}. Loss of {}",
                pct(margin, 1),
                usd(net_profit.abs(), 2)
            ),
        )
    } else if margin < min_margin {
        (
            EconomicVerdict::MarginTooLow,
            format!(
                "Margin {} below threshold {}",
                pct(margin, 1),
                pct(min_margin, 0)
            ),
        )
    } else {
        (
            EconomicVerdict::Pass,
            format!(
                "Margin {} meets threshold {}. Projected profit: {}",
                pct(margin, 1),
                pct(min_margin, 0),
                usd(net_profit, 2)
            ),
        )
    };

    EconomicResult {
        verdict,
        ask_price,
        estimated_resale,
        estimated_logistics: Some(estimated_logistics),
        projected_margin: Some(margin),
        net_profit: Some(net_profit),
        min_margin,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_margin_passes() {
        let result = economic_gate(Some(4500.0), Some(7500.0), 500.0, 0.20);
        assert_eq!(result.verdict, EconomicVerdict::Pass);
        let margin = result.projected_margin.unwrap();
        assert!((margin - 2500.0 / 4500.0).abs() < 1e-9, "got {margin}");
        assert!(result.reason.contains("55.6%"), "reason: {}", result.reason);
        assert!(result.reason.contains("$2,500.00"), "reason: {}", result.reason);
    }

    #[test]
    fn net_profit_subtracts_logistics_once() {
        // (7500 - 4500 - 500) / 4500
        let result = economic_gate(Some(4500.0), Some(7500.0), 500.0, 0.20);
        assert!((result.net_profit.unwrap() - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn thin_margin_is_too_low() {
        let result = economic_gate(Some(8000.0), Some(8200.0), 0.0, 0.20);
        assert_eq!(result.verdict, EconomicVerdict::MarginTooLow);
        assert!(result.reason.contains("2.5%"), "reason: {}", result.reason);
        assert!(result.reason.contains("20%"), "reason: {}", result.reason);
    }

    #[test]
    fn loss_is_negative_margin_with_amount() {
        let result = economic_gate(Some(8000.0), Some(8200.0), 1000.0, 0.20);
        assert_eq!(result.verdict, EconomicVerdict::NegativeMargin);
        assert!(result.projected_margin.unwrap() < 0.0);
        assert!(result.reason.contains("Loss of $800.00"), "reason: {}", result.reason);
    }

    #[test]
    fn margin_exactly_at_threshold_passes() {
        let result = economic_gate(Some(1000.0), Some(1250.0), 0.0, 0.25);
        assert_eq!(result.verdict, EconomicVerdict::Pass);
    }

    #[test]
    fn margin_can_exceed_one() {
        let result = economic_gate(Some(100.0), Some(1000.0), 0.0, 0.20);
        assert!((result.projected_margin.unwrap() - 9.0).abs() < 1e-9);
        assert!(result.passed());
    }

    #[test]
    fn missing_resale_is_missing_data() {
        let result = economic_gate(Some(4500.0), None, 0.0, 0.20);
        assert_eq!(result.verdict, EconomicVerdict::MissingData);
        assert!(result.projected_margin.is_none());
    }

    #[test]
    fn missing_ask_is_missing_data() {
        let result = economic_gate(None, Some(4500.0), 0.0, 0.20);
        assert_eq!(result.verdict, EconomicVerdict::MissingData);
    }

    #[test]
    fn zero_ask_is_missing_data() {
        let result = economic_gate(Some(0.0), Some(4500.0), 0.0, 0.20);
        assert_eq!(result.verdict, EconomicVerdict::MissingData);
        assert_eq!(result.reason, "Ask price must be positive");
        assert!(result.projected_margin.is_none());
    }

    #[test]
    fn nan_price_is_missing_data() {
        let result = economic_gate(Some(f64::NAN), Some(4500.0), 0.0, 0.20);
        assert_eq!(result.verdict, EconomicVerdict::MissingData);
    }
}
