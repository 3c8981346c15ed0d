//! The shape every gate result shares, and the union the pipeline carries.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::economic::EconomicResult;
use crate::identity::IdentityResult;
use crate::shipping::ShippingResult;
use crate::source::SourceResult;

/// Which gate produced a result. Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GateKind {
    Identity,
    Economic,
    Source,
    Shipping,
}

impl GateKind {
    /// All gates in pipeline order.
    pub const ORDER: [GateKind; 4] = [
        GateKind::Identity,
        GateKind::Economic,
        GateKind::Source,
        GateKind::Shipping,
    ];

    /// 1-based position in the pipeline.
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            GateKind::Identity => 1,
            GateKind::Economic => 2,
            GateKind::Source => 3,
            GateKind::Shipping => 4,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Identity => "Identity",
            GateKind::Economic => "Economic",
            GateKind::Source => "Source",
            GateKind::Shipping => "Shipping",
        }
    }

    /// The gate that runs after this one passes, or `None` for the last gate.
    #[must_use]
    pub fn next(self) -> Option<GateKind> {
        match self {
            GateKind::Identity => Some(GateKind::Economic),
            GateKind::Economic => Some(GateKind::Source),
            GateKind::Source => Some(GateKind::Shipping),
            GateKind::Shipping => None,
        }
    }

    /// Fixed confidence reported when this gate decides a veto.
    ///
    /// Reflects which gate made the call, not a calibrated probability.
    #[must_use]
    pub fn veto_confidence(self) -> f64 {
        match self {
            GateKind::Identity => 0.95,
            GateKind::Economic => 0.90,
            GateKind::Source => 0.85,
            GateKind::Shipping => 0.80,
        }
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Gate {})", self.name(), self.number())
    }
}

/// Common read-only view over any gate's result.
pub trait GateOutcome {
    fn kind(&self) -> GateKind;

    fn passed(&self) -> bool;

    /// Upper-snake verdict code, e.g. `"PASS"` or `"WTB_DETECTED"`.
    fn verdict_code(&self) -> &'static str;

    fn reason(&self) -> &str;

    /// Gate-specific audit fields copied into the pipeline's gate record.
    fn details(&self) -> BTreeMap<String, Value> {
        BTreeMap::new()
    }
}

/// A result from one of the four gates, keyed by gate identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "gate", content = "result")]
pub enum GateResult {
    Identity(IdentityResult),
    Economic(EconomicResult),
    Source(SourceResult),
    Shipping(ShippingResult),
}

impl GateResult {
    fn as_outcome(&self) -> &dyn GateOutcome {
        match self {
            GateResult::Identity(r) => r,
            GateResult::Economic(r) => r,
            GateResult::Source(r) => r,
            GateResult::Shipping(r) => r,
        }
    }
}

impl GateOutcome for GateResult {
    fn kind(&self) -> GateKind {
        self.as_outcome().kind()
    }

    fn passed(&self) -> bool {
        self.as_outcome().passed()
    }

    fn verdict_code(&self) -> &'static str {
        self.as_outcome().verdict_code()
    }

    fn reason(&self) -> &str {
        self.as_outcome().reason()
    }

    fn details(&self) -> BTreeMap<String, Value> {
        self.as_outcome().details()
    }
}
