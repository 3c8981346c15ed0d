//! `clearbid evaluate`: load a listing, run the pipeline, print the packet.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use clearbid_core::{AppConfig, GateThresholds};
use clearbid_gates::{build_deal_packet, DealPacket, PipelineVerdict};

/// Command-line values that replace the env-derived thresholds when present.
#[derive(Debug, Default, Clone)]
pub(crate) struct ThresholdOverrides {
    pub(crate) min_margin: Option<f64>,
    pub(crate) min_trust: Option<f64>,
    pub(crate) max_logistics_pct: Option<f64>,
    pub(crate) dest: Option<String>,
}

impl ThresholdOverrides {
    /// Apply the overrides on top of `base` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged thresholds are out of range.
    pub(crate) fn apply(&self, base: &GateThresholds) -> anyhow::Result<GateThresholds> {
        let thresholds = GateThresholds {
            min_margin: self.min_margin.unwrap_or(base.min_margin),
            min_trust: self.min_trust.unwrap_or(base.min_trust),
            max_logistics_pct: self.max_logistics_pct.unwrap_or(base.max_logistics_pct),
            destination: self
                .dest
                .clone()
                .unwrap_or_else(|| base.destination.clone()),
        };
        clearbid_core::validate_thresholds(&thresholds)
            .context("invalid threshold override")?;
        Ok(thresholds)
    }
}

/// Evaluate the listing at `path` and print a summary or the JSON packet.
///
/// # Errors
///
/// Returns an error if the thresholds are invalid or the listing file cannot
/// be loaded. Gate vetoes are not errors.
pub(crate) fn run_evaluate(
    config: &AppConfig,
    path: &Path,
    overrides: &ThresholdOverrides,
    json: bool,
) -> anyhow::Result<()> {
    let thresholds = overrides.apply(&config.thresholds)?;
    let listing = clearbid_core::load_listing(path)
        .with_context(|| format!("failed to load listing {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        destination = %thresholds.destination,
        "evaluating listing"
    );
    let packet = build_deal_packet(&listing, &thresholds);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&packet).context("failed to serialise deal packet")?
        );
    } else {
        print!("{}", render_summary(&packet));
    }
    Ok(())
}

/// Plain-text rendering of a deal packet for the terminal.
pub(crate) fn render_summary(packet: &DealPacket) -> String {
    let composite = &packet.composite;
    let mut out = String::new();

    let _ = writeln!(out, "DealPacket {} ({})", packet.packet_id, packet.timestamp);
    let title = if packet.listing.title.is_empty() {
        "(untitled)"
    } else {
        packet.listing.title.as_str()
    };
    let _ = writeln!(out, "Listing: {title}");
    let _ = writeln!(
        out,
        "Verdict: {} (confidence {:.0}%), gates passed {}/{}",
        packet.verdict,
        packet.confidence * 100.0,
        composite.gates_passed,
        composite.total_gates
    );
    if let Some(gate) = composite.vetoed_at_gate {
        let _ = writeln!(out, "Vetoed at: {gate}");
    }
    if packet.verdict == PipelineVerdict::Go {
        let _ = writeln!(
            out,
            "Recommended offer: {:.2} {}",
            packet.recommended_offer, packet.listing.currency
        );
    }

    let _ = writeln!(out, "Reasoning:");
    for line in &packet.reasoning {
        let _ = writeln!(out, "  - {line}");
    }
    if !composite.risk_flags.is_empty() {
        let _ = writeln!(out, "Risk flags:");
        for flag in &composite.risk_flags {
            let _ = writeln!(out, "  ! {flag}");
        }
    }
    if let Some(shipping) = &composite.shipping {
        if !shipping.cost_breakdown.is_empty() {
            let _ = writeln!(out, "Logistics:");
            for line in &shipping.cost_breakdown {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
    out
}
