//! Deterministic gate pipeline for resale listings.
//!
//! A listing passes through four veto gates in fixed order: identity (is it
//! a genuine sale?), economic (does the margin clear the threshold?), source
//! (is the seller trustworthy?) and shipping (is the route affordable and
//! legal?). The first veto ends the run. Every gate is a pure function over
//! static rule tables, so a run is reproducible and safe to call from any
//! number of threads.

pub mod economic;
pub mod error;
pub mod identity;
pub mod matcher;
pub mod offer;
pub mod outcome;
pub mod pipeline;
pub mod shipping;
pub mod source;

mod format;

pub use economic::{economic_gate, EconomicResult, EconomicVerdict};
pub use error::MatchError;
pub use identity::{identity_gate, IdentityResult, IdentityVerdict};
pub use offer::{build_deal_packet, recommended_offer, DealPacket, OfferBand};
pub use outcome::{GateKind, GateOutcome, GateResult};
pub use pipeline::{evaluate_listing, CompositeResult, GateRecord, PipelineVerdict};
pub use shipping::{shipping_gate, RouteBasis, ShippingResult, ShippingVerdict};
pub use source::{source_gate, SourceResult, SourceVerdict};
