//! Gate 4: logistics cost and import feasibility.
//!
//! Resolves both ends of the route to region codes, screens the description
//! for import-restricted components, then prices the route as shipping plus
//! import duty plus VAT/GST. Vetoes when total logistics exceed
//! `max_logistics_pct` of the ask price.

mod tables;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use crate::format::{pct, usd};
use crate::matcher::RuleSet;
use crate::outcome::{GateKind, GateOutcome};

pub use tables::{duty_rate, resolve_region, route_cost, vat_rate, RouteBasis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingVerdict {
    Pass,
    LogisticsTooExpensive,
    ImportRestriction,
    MissingLocation,
}

impl ShippingVerdict {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ShippingVerdict::Pass => "PASS",
            ShippingVerdict::LogisticsTooExpensive => "LOGISTICS_TOO_EXPENSIVE",
            ShippingVerdict::ImportRestriction => "IMPORT_RESTRICTION",
            ShippingVerdict::MissingLocation => "MISSING_LOCATION",
        }
    }
}

impl std::fmt::Display for ShippingVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the shipping gate.
///
/// Cost fields stay at zero for [`ShippingVerdict::MissingLocation`] and
/// [`ShippingVerdict::ImportRestriction`]; no route is priced in either case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingResult {
    pub verdict: ShippingVerdict,
    pub origin_region: Option<String>,
    pub dest_region: Option<String>,
    pub route_basis: Option<RouteBasis>,
    pub estimated_shipping: f64,
    pub estimated_duties: f64,
    pub estimated_vat: f64,
    pub total_logistics: f64,
    pub total_landed_cost: f64,
    /// `total_logistics / ask`. Infinite when the ask is not positive.
    pub logistics_pct: f64,
    pub max_logistics_pct: f64,
    pub cost_breakdown: Vec<String>,
    pub reason: String,
}

impl ShippingResult {
    fn unpriced(
        verdict: ShippingVerdict,
        origin_region: Option<String>,
        dest_region: Option<String>,
        max_logistics_pct: f64,
        cost_breakdown: Vec<String>,
        reason: String,
    ) -> Self {
        Self {
            verdict,
            origin_region,
            dest_region,
            route_basis: None,
            estimated_shipping: 0.0,
            estimated_duties: 0.0,
            estimated_vat: 0.0,
            total_logistics: 0.0,
            total_landed_cost: 0.0,
            logistics_pct: 0.0,
            max_logistics_pct,
            cost_breakdown,
            reason,
        }
    }
}

impl GateOutcome for ShippingResult {
    fn kind(&self) -> GateKind {
        GateKind::Shipping
    }

    fn passed(&self) -> bool {
        self.verdict == ShippingVerdict::Pass
    }

    fn verdict_code(&self) -> &'static str {
        self.verdict.as_str()
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn details(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            ("shipping".to_string(), Value::from(self.estimated_shipping)),
            ("duties".to_string(), Value::from(self.estimated_duties)),
            ("vat".to_string(), Value::from(self.estimated_vat)),
            ("landed".to_string(), Value::from(self.total_landed_cost)),
        ])
    }
}

static IMPORT_RESTRICTIONS: LazyLock<RuleSet<()>> = LazyLock::new(|| {
    RuleSet::compile(&[
        (
            r"\b(?:catalytic\s*converter|cat\s*con|exhaust\s*emissions)\b",
            "Emissions-regulated component, may require compliance certification",
            (),
        ),
        (
            r"\b(?:airbag|srs|restraint)\b",
            "Safety-regulated component, import restrictions in most jurisdictions",
            (),
        ),
        (
            r"\b(?:refrigerant|r134a|r12|freon|a/?c\s*compressor)\b",
            "Controlled substance (refrigerant), requires EPA/environmental clearance",
            (),
        ),
    ])
    .expect("valid import-restriction regex")
});

/// Resolve a destination, accepting a bare two-letter code the gazetteer
/// does not know (e.g. `"GB"`).
fn resolve_destination(dest: &str) -> Option<String> {
    if let Some(code) = resolve_region(dest) {
        return Some(code.to_string());
    }
    let raw = dest.trim();
    (raw.len() == 2 && raw.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| raw.to_ascii_uppercase())
}

/// Price a route and veto when it is unresolvable, restricted, or too
/// expensive relative to `ask_price`.
#[must_use]
pub fn shipping_gate(
    ask_price: f64,
    origin: &str,
    dest: &str,
    description: &str,
    max_logistics_pct: f64,
) -> ShippingResult {
    let Some(origin_code) = resolve_region(origin) else {
        return ShippingResult::unpriced(
            ShippingVerdict::MissingLocation,
            None,
            resolve_destination(dest),
            max_logistics_pct,
            Vec::new(),
            format!(
                "Cannot resolve origin location: '{origin}'. \
                 Shipping estimate requires a recognisable origin."
            ),
        );
    };

    let Some(dest_code) = resolve_destination(dest) else {
        return ShippingResult::unpriced(
            ShippingVerdict::MissingLocation,
            Some(origin_code.to_string()),
            None,
            max_logistics_pct,
            Vec::new(),
            format!(
                "Cannot resolve destination location: '{dest}'. \
                 Shipping estimate requires a recognisable destination."
            ),
        );
    };

    // Blank descriptions carry no restriction wording.
    if let Ok(Some(rule)) = IMPORT_RESTRICTIONS.first_match(description) {
        return ShippingResult::unpriced(
            ShippingVerdict::ImportRestriction,
            Some(origin_code.to_string()),
            Some(dest_code.clone()),
            max_logistics_pct,
            vec![format!("RESTRICTION: {}", rule.label)],
            format!(
                "Import restriction risk: {}. Route {origin_code} to {dest_code} \
                 may be blocked or require permits.",
                rule.label
            ),
        );
    }

    let (shipping, basis) = route_cost(origin_code, &dest_code);
    let duty_rate = duty_rate(&dest_code);
    let vat_rate = vat_rate(&dest_code);
    let duties = ask_price * duty_rate;
    let vat = (ask_price + duties) * vat_rate;
    let total_logistics = shipping + duties + vat;
    let landed = ask_price + total_logistics;
    let logistics_pct = if ask_price > 0.0 {
        total_logistics / ask_price
    } else {
        f64::INFINITY
    };

    let route_label = match basis.note() {
        Some(note) => format!("{origin_code} to {dest_code}, {note}"),
        None => format!("{origin_code} to {dest_code}"),
    };
    let mut breakdown = vec![
        format!("Shipping ({route_label}): {}", usd(shipping, 0)),
        format!(
            "Import duty ({dest_code}, {}): {}",
            pct(duty_rate, 0),
            usd(duties, 0)
        ),
    ];
    if vat > 0.0 {
        breakdown.push(format!(
            "VAT/GST ({dest_code}, {}): {}",
            pct(vat_rate, 0),
            usd(vat, 0)
        ));
    }
    breakdown.push(format!("Total logistics: {}", usd(total_logistics, 0)));
    breakdown.push(format!("Total landed cost: {}", usd(landed, 0)));

    let (verdict, reason) = if logistics_pct > max_logistics_pct {
        (
            ShippingVerdict::LogisticsTooExpensive,
            format!(
                "Logistics cost {} is {} of ask price (threshold: {}). \
                 Route {origin_code} to {dest_code} is not economically viable at this price point.",
                usd(total_logistics, 0),
                pct(logistics_pct, 1),
                pct(max_logistics_pct, 0)
            ),
        )
    } else {
        (
            ShippingVerdict::Pass,
            format!(
                "Logistics cost {} is {} of ask price (within {} threshold). \
                 Route {origin_code} to {dest_code} is feasible. Total landed cost: {}.",
                usd(total_logistics, 0),
                pct(logistics_pct, 1),
                pct(max_logistics_pct, 0),
                usd(landed, 2)
            ),
        )
    };

    ShippingResult {
        verdict,
        origin_region: Some(origin_code.to_string()),
        dest_region: Some(dest_code),
        route_basis: Some(basis),
        estimated_shipping: shipping,
        estimated_duties: duties,
        estimated_vat: vat,
        total_logistics,
        total_landed_cost: landed,
        logistics_pct,
        max_logistics_pct,
        cost_breakdown: breakdown,
        reason,
    }
}

#[cfg(test)]
mod tests;
