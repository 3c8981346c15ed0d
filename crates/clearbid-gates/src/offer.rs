//! Recommended offer and the `DealPacket` handed to renderers.

use chrono::Utc;
use clearbid_core::{GateThresholds, ListingInput};
use serde::Serialize;
use uuid::Uuid;

use crate::pipeline::{evaluate_listing, CompositeResult, PipelineVerdict};

/// Negotiation stance derived from the projected margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferBand {
    /// Margin above 50%.
    Strong,
    /// Margin above 35%.
    Healthy,
    Thin,
}

impl OfferBand {
    #[must_use]
    pub fn from_margin(margin: f64) -> Self {
        if margin > 0.50 {
            OfferBand::Strong
        } else if margin > 0.35 {
            OfferBand::Healthy
        } else {
            OfferBand::Thin
        }
    }

    /// Fraction of the ask price to open with.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            OfferBand::Strong => 0.82,
            OfferBand::Healthy => 0.88,
            OfferBand::Thin => 0.93,
        }
    }

    #[must_use]
    pub fn note(self) -> &'static str {
        match self {
            OfferBand::Strong => "Strong margin (>50%): aggressive offer recommended",
            OfferBand::Healthy => "Healthy margin (35-50%): moderate negotiation room",
            OfferBand::Thin => "Thin margin: offer near asking price",
        }
    }
}

/// Opening offer for a listing, rounded to cents.
#[must_use]
pub fn recommended_offer(ask_price: f64, margin: f64) -> f64 {
    let offer = ask_price * OfferBand::from_margin(margin).factor();
    (offer * 100.0).round() / 100.0
}

/// A decision ready for rendering: the composite result plus offer, id and
/// timestamp.
///
/// `packet_id` and `timestamp` are the only fields that differ between two
/// packets built from the same input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealPacket {
    /// First 8 hex digits of a v4 UUID, upper-cased.
    pub packet_id: String,
    /// UTC, `YYYY-MM-DD HH:MM UTC`.
    pub timestamp: String,
    pub verdict: PipelineVerdict,
    pub confidence: f64,
    /// Zero unless the verdict is `GO`.
    pub recommended_offer: f64,
    pub offer_band: Option<OfferBand>,
    pub listing: ListingInput,
    pub composite: CompositeResult,
    pub reasoning: Vec<String>,
}

fn new_packet_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_ascii_uppercase()
}

/// Evaluate a listing and wrap the outcome in a [`DealPacket`].
#[must_use]
pub fn build_deal_packet(listing: &ListingInput, thresholds: &GateThresholds) -> DealPacket {
    let composite = evaluate_listing(listing, thresholds);
    let mut reasoning = composite.reasoning.clone();

    let offer = match (composite.verdict, &composite.economic, listing.ask_price) {
        (PipelineVerdict::Go, Some(economic), Some(ask)) => {
            let margin = economic.projected_margin.unwrap_or_default();
            let band = OfferBand::from_margin(margin);
            reasoning.push(band.note().to_string());
            Some((band, recommended_offer(ask, margin)))
        }
        _ => None,
    };

    let packet = DealPacket {
        packet_id: new_packet_id(),
        timestamp: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        verdict: composite.verdict,
        confidence: composite.confidence,
        recommended_offer: offer.map_or(0.0, |(_, amount)| amount),
        offer_band: offer.map(|(band, _)| band),
        listing: listing.clone(),
        composite,
        reasoning,
    };

    tracing::debug!(
        packet_id = %packet.packet_id,
        verdict = %packet.verdict,
        offer = packet.recommended_offer,
        "deal packet built"
    );

    packet
}
