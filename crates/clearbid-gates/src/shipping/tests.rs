use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn japan_to_singapore_prices_every_component() {
    let result = shipping_gate(4500.0, "Yokohama, Japan", "Singapore", "2JZ-GTE long block", 0.35);

    assert_eq!(result.verdict, ShippingVerdict::Pass);
    assert_eq!(result.origin_region.as_deref(), Some("JP"));
    assert_eq!(result.dest_region.as_deref(), Some("SG"));
    assert_eq!(result.route_basis, Some(RouteBasis::Direct));
    assert!(close(result.estimated_shipping, 500.0));
    assert!(close(result.estimated_duties, 0.0));
    assert!(close(result.estimated_vat, 405.0));
    assert!(close(result.total_logistics, 905.0));
    assert!(close(result.total_landed_cost, 5405.0));
    assert!(close(result.logistics_pct, 905.0 / 4500.0));
    assert_eq!(
        result.cost_breakdown,
        vec![
            "Shipping (JP to SG): $500".to_string(),
            "Import duty (SG, 0%): $0".to_string(),
            "VAT/GST (SG, 9%): $405".to_string(),
            "Total logistics: $905".to_string(),
            "Total landed cost: $5,405".to_string(),
        ]
    );
    assert!(
        result.reason.contains("Total landed cost: $5,405.00."),
        "reason: {}",
        result.reason
    );
}

#[test]
fn uk_vat_is_charged_on_price_plus_duty() {
    // 950 + 270 + (4500 + 270) * 0.20
    let result = shipping_gate(4500.0, "Tokyo", "GB", "RB26 engine", 0.35);
    assert!(close(result.estimated_duties, 270.0));
    assert!(close(result.estimated_vat, 954.0));
    assert!(close(result.total_logistics, 2174.0));
    assert_eq!(result.verdict, ShippingVerdict::LogisticsTooExpensive);
    assert!(result.reason.contains("48.3%"), "reason: {}", result.reason);
    assert!(result.reason.contains("threshold: 35%"), "reason: {}", result.reason);
}

#[test]
fn inflected_origin_name_resolves() {
    let result = shipping_gate(4500.0, "Japanese exporter", "Singapore", "engine", 0.35);
    assert_eq!(result.origin_region.as_deref(), Some("JP"));
    assert_eq!(result.verdict, ShippingVerdict::Pass);
}

#[test]
fn kenya_duty_makes_route_too_expensive() {
    let result = shipping_gate(3000.0, "Osaka, Japan", "Nairobi, Kenya", "1JZ engine", 0.35);
    assert_eq!(result.verdict, ShippingVerdict::LogisticsTooExpensive);
    assert!(close(result.total_logistics, 1100.0 + 750.0 + 600.0));
}

#[test]
fn domestic_us_route_uses_flat_rate_and_omits_vat_line() {
    let result = shipping_gate(5000.0, "California", "Texas", "LS3 crate engine", 0.35);
    assert_eq!(result.verdict, ShippingVerdict::Pass);
    assert_eq!(result.route_basis, Some(RouteBasis::Domestic));
    assert!(close(result.total_logistics, 150.0 + 125.0));
    assert_eq!(result.cost_breakdown.len(), 4);
    assert!(result.cost_breakdown[0].contains("domestic flat rate"));
    assert!(!result.cost_breakdown.iter().any(|l| l.starts_with("VAT/GST")));
}

#[test]
fn reversed_pair_is_used_when_direct_missing() {
    let result = shipping_gate(10_000.0, "Singapore", "Japan", "K20 engine", 0.35);
    assert_eq!(result.route_basis, Some(RouteBasis::Reversed));
    assert!(close(result.estimated_shipping, 500.0));
}

#[test]
fn australia_is_not_read_as_us() {
    let result = shipping_gate(10_000.0, "Sydney, Australia", "US", "Barra turbo", 0.35);
    assert_eq!(result.origin_region.as_deref(), Some("AU"));
    assert!(close(result.estimated_shipping, 900.0));
}

#[test]
fn restricted_component_short_circuits_with_zero_costs() {
    let result = shipping_gate(
        2000.0,
        "Tokyo",
        "GB",
        "Complete front clip with catalytic converter",
        0.35,
    );
    assert_eq!(result.verdict, ShippingVerdict::ImportRestriction);
    assert!(result.estimated_shipping.abs() < f64::EPSILON);
    assert!(result.total_logistics.abs() < f64::EPSILON);
    assert!(result.total_landed_cost.abs() < f64::EPSILON);
    assert_eq!(result.cost_breakdown.len(), 1);
    assert!(result.cost_breakdown[0].starts_with("RESTRICTION: Emissions-regulated"));
    assert!(result.reason.contains("Route JP to GB"), "reason: {}", result.reason);
}

#[test]
fn first_restriction_rule_wins() {
    let result = shipping_gate(2000.0, "Tokyo", "GB", "Airbag module and AC compressor", 0.35);
    assert!(result.cost_breakdown[0].contains("Safety-regulated"));
}

#[test]
fn unknown_origin_is_missing_location() {
    let result = shipping_gate(4500.0, "somewhere", "GB", "engine", 0.35);
    assert_eq!(result.verdict, ShippingVerdict::MissingLocation);
    assert!(result.origin_region.is_none());
    assert!(result.reason.contains("'somewhere'"));
    assert!(result.total_logistics.abs() < f64::EPSILON);
}

#[test]
fn bare_two_letter_destination_is_accepted() {
    let result = shipping_gate(4500.0, "Tokyo", "gb", "engine", 1.0);
    assert_eq!(result.dest_region.as_deref(), Some("GB"));
    assert_ne!(result.verdict, ShippingVerdict::MissingLocation);
}

#[test]
fn unknown_destination_name_is_missing_location() {
    let result = shipping_gate(4500.0, "Tokyo", "Nowhereville", "engine", 0.35);
    assert_eq!(result.verdict, ShippingVerdict::MissingLocation);
    assert_eq!(result.origin_region.as_deref(), Some("JP"));
    assert!(result.dest_region.is_none());
}

#[test]
fn non_positive_ask_is_infinitely_expensive() {
    let result = shipping_gate(0.0, "Tokyo", "SG", "engine", 0.35);
    assert_eq!(result.verdict, ShippingVerdict::LogisticsTooExpensive);
    assert!(result.logistics_pct.is_infinite());
}

#[test]
fn blank_description_is_not_restricted() {
    let result = shipping_gate(5000.0, "California", "US", "", 0.35);
    assert_eq!(result.verdict, ShippingVerdict::Pass);
}

#[test]
fn details_carry_cost_components() {
    let result = shipping_gate(4500.0, "Tokyo", "SG", "engine", 0.35);
    let details = result.details();
    assert_eq!(details["shipping"], serde_json::json!(500.0));
    assert!(close(details["landed"].as_f64().unwrap(), 5405.0));
    assert!(details.contains_key("duties") && details.contains_key("vat"));
    assert_eq!(result.verdict_code(), "PASS");
}
