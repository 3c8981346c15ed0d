//! Composite orchestrator: runs the four gates in order and stops at the
//! first veto.
//!
//! The run is a small state machine over [`GateKind`]. Each visited gate
//! appends one [`GateRecord`] and one reasoning line; a veto also appends
//! risk flags and ends the run as `NO_GO`, while passing the last gate ends
//! it as `GO`.

use std::collections::BTreeMap;

use clearbid_core::{GateThresholds, ListingInput};
use serde::Serialize;
use serde_json::Value;

use crate::economic::{economic_gate, EconomicResult, EconomicVerdict};
use crate::format::{pct, usd};
use crate::identity::{identity_gate, IdentityResult};
use crate::outcome::{GateKind, GateOutcome, GateResult};
use crate::shipping::{shipping_gate, ShippingResult, ShippingVerdict};
use crate::source::{source_gate, SourceResult};

/// Confidence reported when every gate passes.
pub const FULL_PASS_CONFIDENCE: f64 = 0.85;

/// How many negative seller signals are surfaced as risk flags on a source veto.
const MAX_SELLER_RISK_FLAGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineVerdict {
    Go,
    NoGo,
    /// Reserved for a future soft-veto band; never produced today.
    Review,
}

impl PipelineVerdict {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineVerdict::Go => "GO",
            PipelineVerdict::NoGo => "NO_GO",
            PipelineVerdict::Review => "REVIEW",
        }
    }
}

impl std::fmt::Display for PipelineVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit entry for one gate visited during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateRecord {
    pub gate_name: String,
    pub gate_number: usize,
    pub passed: bool,
    pub verdict_code: String,
    pub reason: String,
    /// 1-based position in this run.
    pub execution_order: usize,
    pub details: BTreeMap<String, Value>,
}

/// Aggregated, auditable output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResult {
    pub verdict: PipelineVerdict,
    pub vetoed_at_gate: Option<GateKind>,
    pub confidence: f64,
    pub gates_run: usize,
    pub gates_passed: usize,
    pub total_gates: usize,
    pub gate_records: Vec<GateRecord>,
    pub reasoning: Vec<String>,
    pub risk_flags: Vec<String>,
    pub identity: Option<IdentityResult>,
    pub economic: Option<EconomicResult>,
    pub source: Option<SourceResult>,
    pub shipping: Option<ShippingResult>,
}

impl CompositeResult {
    fn empty() -> Self {
        Self {
            verdict: PipelineVerdict::NoGo,
            vetoed_at_gate: None,
            confidence: 0.0,
            gates_run: 0,
            gates_passed: 0,
            total_gates: GateKind::ORDER.len(),
            gate_records: Vec::new(),
            reasoning: Vec::new(),
            risk_flags: Vec::new(),
            identity: None,
            economic: None,
            source: None,
            shipping: None,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.gates_passed == self.total_gates
    }

    /// `"passed/run"`, e.g. `"2/3"`.
    #[must_use]
    pub fn pass_rate(&self) -> String {
        format!("{}/{}", self.gates_passed, self.gates_run)
    }

    fn record(&mut self, result: &GateResult) {
        self.gates_run += 1;
        let kind = result.kind();
        self.gate_records.push(GateRecord {
            gate_name: kind.name().to_string(),
            gate_number: kind.number(),
            passed: result.passed(),
            verdict_code: result.verdict_code().to_string(),
            reason: result.reason().to_string(),
            execution_order: self.gates_run,
            details: result.details(),
        });
    }

    fn store(&mut self, result: GateResult) {
        match result {
            GateResult::Identity(r) => self.identity = Some(r),
            GateResult::Economic(r) => self.economic = Some(r),
            GateResult::Source(r) => self.source = Some(r),
            GateResult::Shipping(r) => self.shipping = Some(r),
        }
    }

    fn accept(&mut self) {
        self.verdict = PipelineVerdict::Go;
        self.confidence = FULL_PASS_CONFIDENCE;
        self.reasoning.push(format!(
            "All {}/{} gates passed. Deal is viable, proceed to offer calculation.",
            self.gates_passed, self.total_gates
        ));
    }

    fn reject(
        &mut self,
        result: &GateResult,
        listing: &ListingInput,
        thresholds: &GateThresholds,
    ) {
        let kind = result.kind();
        self.verdict = PipelineVerdict::NoGo;
        self.vetoed_at_gate = Some(kind);
        self.confidence = kind.veto_confidence();
        self.reasoning
            .push(format!("{} gate vetoed: {}", kind.name(), result.reason()));
        self.risk_flags.extend(risk_flags(result, listing, thresholds));
    }
}

fn run_gate(kind: GateKind, listing: &ListingInput, thresholds: &GateThresholds) -> GateResult {
    match kind {
        GateKind::Identity => GateResult::Identity(identity_gate(&listing.description)),
        GateKind::Economic => GateResult::Economic(economic_gate(
            listing.ask_price,
            listing.estimated_resale,
            listing.estimated_logistics,
            thresholds.min_margin,
        )),
        GateKind::Source => GateResult::Source(source_gate(
            &listing.description,
            &listing.seller_id,
            &listing.platform,
            &listing.location,
            thresholds.min_trust,
        )),
        // The economic gate has already rejected a missing ask by now.
        GateKind::Shipping => GateResult::Shipping(shipping_gate(
            listing.ask_price.unwrap_or_default(),
            &listing.location,
            &thresholds.destination,
            &listing.description,
            thresholds.max_logistics_pct,
        )),
    }
}

fn pass_line(result: &GateResult) -> String {
    match result {
        GateResult::Identity(_) => "Identity gate passed: listing is a genuine sale".to_string(),
        GateResult::Economic(r) => format!(
            "Economic gate passed: {} margin (threshold: {})",
            pct(r.projected_margin.unwrap_or_default(), 1),
            pct(r.min_margin, 0)
        ),
        GateResult::Source(r) => format!(
            "Source gate passed: trust score {:.2} ({} positive signals)",
            r.trust_score,
            r.signals_positive.len()
        ),
        GateResult::Shipping(r) => format!(
            "Shipping gate passed: landed cost {} (logistics {})",
            usd(r.total_landed_cost, 0),
            usd(r.total_logistics, 0)
        ),
    }
}

fn risk_flags(
    result: &GateResult,
    listing: &ListingInput,
    thresholds: &GateThresholds,
) -> Vec<String> {
    match result {
        GateResult::Identity(r) => vec![format!("Non-sale listing detected ({})", r.verdict)],
        GateResult::Economic(r) => vec![match r.verdict {
            EconomicVerdict::NegativeMargin => "Negative margin, guaranteed loss".to_string(),
            EconomicVerdict::MissingData => "Incomplete pricing data, margin unknown".to_string(),
            EconomicVerdict::MarginTooLow | EconomicVerdict::Pass => {
                "Margin below viability threshold".to_string()
            }
        }],
        GateResult::Source(r) => {
            let mut flags = vec![format!(
                "Seller trust score {:.2} below threshold {:.2}",
                r.trust_score, r.min_trust
            )];
            flags.extend(
                r.signals_negative
                    .iter()
                    .take(MAX_SELLER_RISK_FLAGS)
                    .map(|neg| format!("Seller risk: {neg}")),
            );
            flags
        }
        GateResult::Shipping(r) => {
            let dest = &thresholds.destination;
            vec![match r.verdict {
                ShippingVerdict::ImportRestriction => {
                    format!("Import restriction risk on route to {dest}")
                }
                ShippingVerdict::MissingLocation if r.origin_region.is_none() => {
                    format!("Shipping origin '{}' could not be resolved", listing.location)
                }
                ShippingVerdict::MissingLocation => {
                    format!("Shipping destination '{dest}' could not be resolved")
                }
                ShippingVerdict::LogisticsTooExpensive | ShippingVerdict::Pass => {
                    format!("Logistics cost too high for route to {dest}")
                }
            }]
        }
    }
}

/// Run a listing through all four gates, stopping at the first veto.
///
/// Deterministic: the same listing and thresholds always produce an equal
/// [`CompositeResult`].
#[must_use]
pub fn evaluate_listing(listing: &ListingInput, thresholds: &GateThresholds) -> CompositeResult {
    let mut composite = CompositeResult::empty();
    let mut current = Some(GateKind::Identity);

    while let Some(kind) = current {
        let result = run_gate(kind, listing, thresholds);
        let passed = result.passed();
        tracing::debug!(
            gate = kind.name(),
            verdict = result.verdict_code(),
            passed,
            "gate evaluated"
        );

        composite.record(&result);
        if passed {
            composite.gates_passed += 1;
            composite.reasoning.push(pass_line(&result));
            composite.store(result);
            current = kind.next();
        } else {
            composite.reject(&result, listing, thresholds);
            composite.store(result);
            break;
        }
    }

    if composite.vetoed_at_gate.is_none() {
        composite.accept();
    }

    tracing::info!(
        verdict = %composite.verdict,
        gates_run = composite.gates_run,
        confidence = composite.confidence,
        vetoed_at = ?composite.vetoed_at_gate,
        "pipeline decision"
    );

    composite
}
