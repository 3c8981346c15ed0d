//! `clearbid sample`: print a ready-made listing to feed back into `evaluate`.

use anyhow::Context;
use clap::ValueEnum;
use clearbid_core::ListingInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SampleKind {
    /// A documented UK sale that clears every gate with default thresholds
    Go,
    /// A want-to-buy post that the identity gate rejects
    NoGo,
}

pub(crate) fn sample_listing(kind: SampleKind) -> ListingInput {
    match kind {
        SampleKind::Go => ListingInput {
            title: "Toyota 2JZ-GTE Non-VVTi Complete Engine".to_string(),
            description: "Selling a clean 2JZ-GTE non-VVTi pulled from a 1995 JZA80 Supra. \
                          145,000 km, compression tested all 6 cylinders, no leaks. \
                          Comes with turbo, exhaust manifold, ECU, and wiring harness. \
                          Photos available. Located in Manchester, can arrange delivery."
                .to_string(),
            ask_price: Some(4500.0),
            currency: "USD".to_string(),
            estimated_resale: Some(7500.0),
            estimated_logistics: 650.0,
            platform: "Telegram".to_string(),
            seller_id: "@jdm_uk_imports".to_string(),
            location: "Manchester, UK".to_string(),
            category: "JDM Engines / Powertrain".to_string(),
            image_url: None,
        },
        SampleKind::NoGo => ListingInput {
            title: "WTB: RB26DETT for R32 GTR project".to_string(),
            description: "Looking for a clean RB26DETT, must have matching numbers. \
                          Budget around $6000. Located in Melbourne, can organise \
                          freight from Japan. Anyone selling?"
                .to_string(),
            ask_price: Some(6000.0),
            currency: "USD".to_string(),
            estimated_resale: Some(8500.0),
            estimated_logistics: 900.0,
            platform: "Telegram".to_string(),
            seller_id: "@melb_gtr_builds".to_string(),
            location: "Melbourne, Australia".to_string(),
            category: "JDM Engines / Powertrain".to_string(),
            image_url: None,
        },
    }
}

/// # Errors
///
/// Returns an error if the listing cannot be serialised.
pub(crate) fn run_sample(kind: SampleKind) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(&sample_listing(kind))
        .context("failed to serialise sample listing")?;
    print!("{yaml}");
    Ok(())
}
