//! Static lookup tables for the shipping gate.
//!
//! Costs are RORO/container estimates in USD for engine-sized items
//! (~200kg). Rates are fractions of declared value.

use serde::Serialize;

/// Freeform place name → two-letter region code. Scanned in order; the first
/// key found in the location wins.
const GAZETTEER: &[(&str, &str)] = &[
    // Japan
    ("japan", "JP"),
    ("tokyo", "JP"),
    ("yokohama", "JP"),
    ("osaka", "JP"),
    ("nagoya", "JP"),
    ("kobe", "JP"),
    ("fukuoka", "JP"),
    ("sapporo", "JP"),
    ("hiroshima", "JP"),
    ("kyoto", "JP"),
    // United States
    ("usa", "US"),
    ("united states", "US"),
    ("us", "US"),
    ("california", "US"),
    ("bay area", "US"),
    ("los angeles", "US"),
    ("new york", "US"),
    ("texas", "US"),
    ("florida", "US"),
    ("chicago", "US"),
    ("miami", "US"),
    // United Kingdom
    ("uk", "GB"),
    ("united kingdom", "GB"),
    ("england", "GB"),
    ("london", "GB"),
    ("birmingham", "GB"),
    ("manchester", "GB"),
    ("scotland", "GB"),
    // Australia
    ("australia", "AU"),
    ("sydney", "AU"),
    ("melbourne", "AU"),
    ("brisbane", "AU"),
    ("perth", "AU"),
    ("nsw", "AU"),
    ("vic", "AU"),
    ("qld", "AU"),
    // United Arab Emirates
    ("uae", "AE"),
    ("dubai", "AE"),
    ("abu dhabi", "AE"),
    ("sharjah", "AE"),
    // Canada
    ("canada", "CA"),
    ("toronto", "CA"),
    ("vancouver", "CA"),
    ("montreal", "CA"),
    // Europe
    ("germany", "DE"),
    ("berlin", "DE"),
    ("munich", "DE"),
    ("netherlands", "NL"),
    ("amsterdam", "NL"),
    ("rotterdam", "NL"),
    // Kenya
    ("kenya", "KE"),
    ("nairobi", "KE"),
    ("mombasa", "KE"),
    // Southeast Asia
    ("singapore", "SG"),
    ("thailand", "TH"),
    ("bangkok", "TH"),
];

/// Directed `(origin, destination)` → shipping cost in USD.
const SHIPPING_COSTS: &[((&str, &str), f64)] = &[
    (("JP", "US"), 800.0),
    (("JP", "GB"), 950.0),
    (("JP", "AU"), 650.0),
    (("JP", "AE"), 700.0),
    (("JP", "CA"), 850.0),
    (("JP", "DE"), 900.0),
    (("JP", "NL"), 900.0),
    (("JP", "KE"), 1100.0),
    (("JP", "SG"), 500.0),
    (("JP", "TH"), 450.0),
    (("US", "GB"), 700.0),
    (("US", "AU"), 900.0),
    (("US", "CA"), 400.0),
    (("US", "AE"), 1000.0),
    (("US", "JP"), 800.0),
    (("US", "KE"), 1200.0),
    (("GB", "US"), 700.0),
    (("GB", "AU"), 950.0),
    (("GB", "AE"), 600.0),
    (("GB", "KE"), 800.0),
    (("AU", "US"), 900.0),
    (("AU", "GB"), 950.0),
    (("AU", "JP"), 650.0),
    (("AE", "KE"), 500.0),
    (("AE", "GB"), 600.0),
    (("DE", "GB"), 350.0),
    (("DE", "US"), 750.0),
    (("NL", "GB"), 300.0),
];

/// Import duty by destination.
const DUTY_RATES: &[(&str, f64)] = &[
    ("US", 0.025),
    ("GB", 0.06),
    ("AU", 0.05),
    ("AE", 0.05),
    ("CA", 0.06),
    ("DE", 0.06),
    ("NL", 0.06),
    ("KE", 0.25),
    ("SG", 0.0),
    ("TH", 0.10),
    ("JP", 0.0),
];

/// VAT/GST by destination, charged on declared value plus duty.
const VAT_RATES: &[(&str, f64)] = &[
    ("US", 0.0),
    ("GB", 0.20),
    ("AU", 0.10),
    ("AE", 0.05),
    ("CA", 0.05),
    ("DE", 0.19),
    ("NL", 0.21),
    ("KE", 0.16),
    ("SG", 0.09),
    ("TH", 0.07),
    ("JP", 0.10),
];

pub(crate) const DEFAULT_DUTY_RATE: f64 = 0.05;
pub(crate) const DEFAULT_VAT_RATE: f64 = 0.0;
pub(crate) const DOMESTIC_SHIPPING: f64 = 150.0;
pub(crate) const UNKNOWN_ROUTE_SHIPPING: f64 = 1000.0;

/// How a shipping cost was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteBasis {
    /// Exact `(origin, destination)` table entry.
    Direct,
    /// Reversed pair used as an approximation.
    Reversed,
    /// Same region at both ends.
    Domestic,
    /// No table entry; conservative flat estimate.
    Default,
}

impl RouteBasis {
    pub(crate) fn note(self) -> Option<&'static str> {
        match self {
            RouteBasis::Direct => None,
            RouteBasis::Reversed => Some("reverse-route estimate"),
            RouteBasis::Domestic => Some("domestic flat rate"),
            RouteBasis::Default => Some("default estimate"),
        }
    }
}

/// Keys this short are matched as whole words only; longer keys match as
/// substrings so inflected forms like "Japanese" or "Londoner" still resolve.
const WHOLE_WORD_KEY_MAX_LEN: usize = 3;

/// Resolve a freeform location to a two-letter region code via the gazetteer.
///
/// Short keys (`us`, `uk`, `nsw`, ...) must appear as whole words, so `"us"`
/// does not fire inside `"Australia"`.
#[must_use]
pub fn resolve_region(location: &str) -> Option<&'static str> {
    let normalized: String = location
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return None;
    }
    let padded = format!(" {normalized} ");

    GAZETTEER
        .iter()
        .find(|(key, _)| {
            if key.len() <= WHOLE_WORD_KEY_MAX_LEN {
                padded.contains(&format!(" {key} "))
            } else {
                normalized.contains(*key)
            }
        })
        .map(|&(_, code)| code)
}

/// Shipping cost for a route, trying the exact pair, then the reversed pair,
/// then a domestic or conservative flat rate.
#[must_use]
pub fn route_cost(origin: &str, dest: &str) -> (f64, RouteBasis) {
    let lookup = |from: &str, to: &str| {
        SHIPPING_COSTS
            .iter()
            .find(|((o, d), _)| *o == from && *d == to)
            .map(|&(_, cost)| cost)
    };

    if let Some(cost) = lookup(origin, dest) {
        (cost, RouteBasis::Direct)
    } else if let Some(cost) = lookup(dest, origin) {
        (cost, RouteBasis::Reversed)
    } else if origin == dest {
        (DOMESTIC_SHIPPING, RouteBasis::Domestic)
    } else {
        (UNKNOWN_ROUTE_SHIPPING, RouteBasis::Default)
    }
}

#[must_use]
pub fn duty_rate(dest: &str) -> f64 {
    rate_for(DUTY_RATES, dest).unwrap_or(DEFAULT_DUTY_RATE)
}

#[must_use]
pub fn vat_rate(dest: &str) -> f64 {
    rate_for(VAT_RATES, dest).unwrap_or(DEFAULT_VAT_RATE)
}

fn rate_for(table: &[(&str, f64)], dest: &str) -> Option<f64> {
    table
        .iter()
        .find(|(code, _)| *code == dest)
        .map(|&(_, rate)| rate)
}
