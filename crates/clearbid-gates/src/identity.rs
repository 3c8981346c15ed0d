//! Gate 1: is the listing an actual sale?
//!
//! Filters out want-to-buy posts, wanted/ISO requests, price checks and
//! reposts. The first matching rule group decides the veto code.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use crate::error::MatchError;
use crate::matcher::RuleSet;
use crate::outcome::{GateKind, GateOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityVerdict {
    Pass,
    WtbDetected,
    WantedAd,
    PriceCheck,
    EmptyListing,
    DuplicateMarker,
}

impl IdentityVerdict {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IdentityVerdict::Pass => "PASS",
            IdentityVerdict::WtbDetected => "WTB_DETECTED",
            IdentityVerdict::WantedAd => "WANTED_AD",
            IdentityVerdict::PriceCheck => "PRICE_CHECK",
            IdentityVerdict::EmptyListing => "EMPTY_LISTING",
            IdentityVerdict::DuplicateMarker => "DUPLICATE_MARKER",
        }
    }
}

impl std::fmt::Display for IdentityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityResult {
    pub verdict: IdentityVerdict,
    /// Label of the rule that triggered the veto; empty on pass.
    pub matched_patterns: Vec<String>,
    /// The trimmed listing text that was scanned.
    pub original_text: String,
    /// A veto fired while sale-positive signals were also present.
    pub ambiguous: bool,
    pub reason: String,
}

impl GateOutcome for IdentityResult {
    fn kind(&self) -> GateKind {
        GateKind::Identity
    }

    fn passed(&self) -> bool {
        self.verdict == IdentityVerdict::Pass
    }

    fn verdict_code(&self) -> &'static str {
        self.verdict.as_str()
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn details(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            (
                "matched_patterns".to_string(),
                Value::from(self.matched_patterns.clone()),
            ),
            ("ambiguous".to_string(), Value::from(self.ambiguous)),
        ])
    }
}

// Group order is load-bearing: WTB beats wanted beats price check beats repost.
static NON_SALE_RULES: LazyLock<RuleSet<IdentityVerdict>> = LazyLock::new(|| {
    RuleSet::compile(&[
        (r"\bW\s*T\s*B\b", "WTB marker", IdentityVerdict::WtbDetected),
        (r"\bwant\s+to\s+buy\b", "want to buy", IdentityVerdict::WtbDetected),
        (
            r"\bbuying\b.*\bany(?:one|body)?\b",
            "buying request",
            IdentityVerdict::WtbDetected,
        ),
        (
            r"\b(?:wanted|looking\s+for|in\s+search\s+of|ISO)\b",
            "wanted/ISO ad",
            IdentityVerdict::WantedAd,
        ),
        (
            r"\bseeking\b.*\b(?:parts?|engine|vehicle|unit)\b",
            "seeking parts",
            IdentityVerdict::WantedAd,
        ),
        (
            r"\bneed\b.*\b(?:urgently?|asap|quickly)\b",
            "urgent need request",
            IdentityVerdict::WantedAd,
        ),
        (
            r"\banyone\s+(?:selling|have|got)\b",
            "anyone selling query",
            IdentityVerdict::WantedAd,
        ),
        (
            r"\b(?:price\s*check|PC|what(?:'?s|\s+is)\s+(?:this|it)\s+worth)\b",
            "price check",
            IdentityVerdict::PriceCheck,
        ),
        (
            r"\bhow\s+much\s+(?:is|are|would|should)\b",
            "valuation query",
            IdentityVerdict::PriceCheck,
        ),
        (
            r"\b(?:repost|bump|re-?listing)\b",
            "repost/bump",
            IdentityVerdict::DuplicateMarker,
        ),
    ])
    .expect("valid identity regex")
});

static SALE_SIGNALS: LazyLock<RuleSet<()>> = LazyLock::new(|| {
    RuleSet::compile(&[
        (r"\b(?:for\s+sale|F/?S|selling|sell)\b", "for sale", ()),
        (r"\$\s*\d+", "price figure", ()),
        (
            r"\b(?:OBO|firm|negotiable|ONO|or\s+best\s+offer)\b",
            "offer terms",
            (),
        ),
        (r"\b(?:DM|PM|inbox|message)\s+(?:me|for)\b", "contact request", ()),
    ])
    .expect("valid sale-signal regex")
});

/// Classify a listing's text as a genuine sale or a non-sale post.
///
/// Empty text yields [`IdentityVerdict::EmptyListing`]. When a non-sale rule
/// matches and sale-positive wording is also present, the veto stands and the
/// result is marked `ambiguous`.
#[must_use]
pub fn identity_gate(text: &str) -> IdentityResult {
    let cleaned = text.trim();

    let hit = match NON_SALE_RULES.first_match(cleaned) {
        Ok(hit) => hit,
        Err(MatchError::EmptyText) => {
            return IdentityResult {
                verdict: IdentityVerdict::EmptyListing,
                matched_patterns: Vec::new(),
                original_text: String::new(),
                ambiguous: false,
                reason: "Empty or whitespace-only listing text".to_string(),
            };
        }
    };

    let Some(rule) = hit else {
        return IdentityResult {
            verdict: IdentityVerdict::Pass,
            matched_patterns: Vec::new(),
            original_text: cleaned.to_string(),
            ambiguous: false,
            reason: "No non-sale intent patterns detected. Listing appears to be a genuine sale."
                .to_string(),
        };
    };

    let ambiguous = matches!(SALE_SIGNALS.any_match(cleaned), Ok(true));
    let reason = if ambiguous {
        format!(
            "Non-sale intent detected: {}. NOTE: Sale-positive signals also present, listing is ambiguous.",
            rule.label
        )
    } else {
        format!(
            "Non-sale intent detected: {}. No sale-positive signals found.",
            rule.label
        )
    };

    IdentityResult {
        verdict: rule.effect,
        matched_patterns: vec![rule.label.to_string()],
        original_text: cleaned.to_string(),
        ambiguous,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genuine_sale_passes() {
        let result = identity_gate("Selling 2JZ-GTE engine, low miles, $4500 OBO. DM for pics.");
        assert_eq!(result.verdict, IdentityVerdict::Pass);
        assert!(result.passed());
        assert!(result.matched_patterns.is_empty());
    }

    #[test]
    fn for_sale_with_location_passes() {
        let result = identity_gate("For sale: complete K24 swap kit, $3200. Located Bay Area.");
        assert!(result.passed(), "reason: {}", result.reason);
    }

    #[test]
    fn wtb_vetoes_even_with_price_figure() {
        let result = identity_gate("WTB: engine $500");
        assert_eq!(result.verdict, IdentityVerdict::WtbDetected);
        assert!(result.ambiguous);
        assert!(result.reason.contains("ambiguous"), "reason: {}", result.reason);
    }

    #[test]
    fn wtb_takes_precedence_over_wanted_group() {
        // Matches both the WTB group and the "looking for" group.
        let result = identity_gate("WTB: looking for a clean 2JZ-GTE, budget $4000");
        assert_eq!(result.verdict, IdentityVerdict::WtbDetected);
        assert_eq!(result.matched_patterns, vec!["WTB marker".to_string()]);
    }

    #[test]
    fn looking_for_is_wanted_ad() {
        let result = identity_gate("Looking for a clean SR20DET, anyone selling?");
        assert_eq!(result.verdict, IdentityVerdict::WantedAd);
    }

    #[test]
    fn iso_is_wanted_ad_without_sale_signals() {
        let result = identity_gate("ISO RB25DET Neo, must be running.");
        assert_eq!(result.verdict, IdentityVerdict::WantedAd);
        assert!(!result.ambiguous);
        assert!(result.reason.contains("No sale-positive signals"));
    }

    #[test]
    fn price_check_is_vetoed() {
        let result = identity_gate("Price check, what's a 1JZ-GTE worth these days?");
        assert_eq!(result.verdict, IdentityVerdict::PriceCheck);
    }

    #[test]
    fn repost_is_duplicate_marker() {
        let result = identity_gate("REPOST: Still available! RB26 complete swap, $8500 firm.");
        assert_eq!(result.verdict, IdentityVerdict::DuplicateMarker);
        assert!(result.ambiguous);
    }

    #[test]
    fn empty_text_is_empty_listing() {
        let result = identity_gate("");
        assert_eq!(result.verdict, IdentityVerdict::EmptyListing);
        assert!(!result.passed());
    }

    #[test]
    fn whitespace_text_is_empty_listing() {
        assert_eq!(identity_gate("   \n\t ").verdict, IdentityVerdict::EmptyListing);
    }

    #[test]
    fn original_text_is_trimmed() {
        let result = identity_gate("  For sale: K20A  ");
        assert_eq!(result.original_text, "For sale: K20A");
    }

    #[test]
    fn verdict_code_is_upper_snake() {
        assert_eq!(identity_gate("WTB turbo").verdict_code(), "WTB_DETECTED");
        assert_eq!(
            serde_json::to_value(IdentityVerdict::DuplicateMarker).unwrap(),
            serde_json::json!("DUPLICATE_MARKER")
        );
    }
}
