//! Gate 3: seller reputation.
//!
//! Scores a seller from what the listing itself shows: the platform's
//! baseline trust, the shape of the seller ID, red-flag and trust-signal
//! wording in the description, and whether a location was disclosed. No
//! external lookups are made.
//!
//! Bands: `score >= min_trust` passes, `[0.30, min_trust)` is CAUTION and
//! anything lower is HIGH_RISK. Both non-passing bands veto.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::matcher::RuleSet;
use crate::outcome::{GateKind, GateOutcome};

/// Scores below this are HIGH_RISK regardless of `min_trust`.
pub const HIGH_RISK_CEILING: f64 = 0.30;

const DEFAULT_BASELINE: f64 = 0.50;
const LOCATION_BONUS: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceVerdict {
    Pass,
    HighRisk,
    Caution,
    MissingSellerId,
}

impl SourceVerdict {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceVerdict::Pass => "PASS",
            SourceVerdict::HighRisk => "HIGH_RISK",
            SourceVerdict::Caution => "CAUTION",
            SourceVerdict::MissingSellerId => "MISSING_SELLER_ID",
        }
    }
}

impl std::fmt::Display for SourceVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceResult {
    pub verdict: SourceVerdict,
    /// Clamped to `[0, 1]` and canonicalised to two decimals.
    pub trust_score: f64,
    pub min_trust: f64,
    pub signals_positive: Vec<String>,
    pub signals_negative: Vec<String>,
    pub reason: String,
}

impl GateOutcome for SourceResult {
    fn kind(&self) -> GateKind {
        GateKind::Source
    }

    fn passed(&self) -> bool {
        self.verdict == SourceVerdict::Pass
    }

    fn verdict_code(&self) -> &'static str {
        self.verdict.as_str()
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn details(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            ("trust_score".to_string(), Value::from(self.trust_score)),
            (
                "positives".to_string(),
                Value::from(self.signals_positive.len()),
            ),
            (
                "negatives".to_string(),
                Value::from(self.signals_negative.len()),
            ),
        ])
    }
}

static RED_FLAGS: LazyLock<RuleSet<f64>> = LazyLock::new(|| {
    RuleSet::compile(&[
        (
            r"\b(?:wire\s*transfer|western\s*union|moneygram)\b",
            "Payment via irreversible wire transfer",
            -0.25,
        ),
        (
            r"\b(?:no\s*refund|all\s*sales?\s*final|as[\s-]?is)\b",
            "No refund / as-is disclaimer",
            -0.10,
        ),
        (
            r"\b(?:act\s*fast|limited\s*time|won'?t\s*last|going\s*quick)\b",
            "Urgency pressure language",
            -0.15,
        ),
        (
            r"\b(?:too\s*good|unbelievable|incredible\s*deal|steal)\b",
            "Hype language (too good to be true)",
            -0.15,
        ),
        (
            r"\b(?:send\s*money\s*first|pay\s*upfront|deposit\s*required)\b",
            "Upfront payment demand",
            -0.20,
        ),
        (
            r"\b(?:no\s*questions?\s*asked|don'?t\s*ask)\b",
            "Suspicious secrecy language",
            -0.20,
        ),
        (
            r"\b(?:stolen|hot|fell\s*off\s*(?:a\s*)?truck)\b",
            "Possible stolen goods language",
            -0.30,
        ),
    ])
    .expect("valid red-flag regex")
});

static TRUST_SIGNALS: LazyLock<RuleSet<f64>> = LazyLock::new(|| {
    RuleSet::compile(&[
        (
            r"\b(?:compression\s*test|leak[\s-]?down|dyno|tested)\b",
            "Technical verification mentioned",
            0.10,
        ),
        (
            r"\b(?:video|photos?|pics?|images?|documented)\b",
            "Visual evidence available",
            0.08,
        ),
        (
            r"\b(?:receipt|invoice|paperwork|documentation|title|cert)\b",
            "Documentation / paperwork available",
            0.12,
        ),
        (
            r"\b(?:PayPal|escrow|buyer\s*protection)\b",
            "Buyer-protected payment method",
            0.10,
        ),
        (
            r"\b(?:warranty|guarantee|return)\b",
            "Warranty or return policy",
            0.10,
        ),
        (
            r"\b(?:years?\s*(?:in\s*business|experience|selling)|established|since\s*\d{4})\b",
            "Established seller signals",
            0.12,
        ),
        (
            r"\b(?:feedback|reviews?|rated|reputation|trusted)\b",
            "Reputation references",
            0.08,
        ),
    ])
    .expect("valid trust-signal regex")
});

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\w{3,}").expect("valid handle regex"));

/// Baseline trust per platform, keyed by lower-case, underscore-joined name.
const PLATFORM_BASELINES: &[(&str, f64)] = &[
    ("telegram", 0.45),
    ("whatsapp", 0.45),
    ("facebook", 0.55),
    ("ebay", 0.65),
    ("yahoo_auctions", 0.60),
    ("gumtree", 0.50),
    ("craigslist", 0.40),
    ("upwork", 0.60),
    ("linkedin", 0.65),
];

/// Look up the baseline trust for a platform name such as `"Yahoo Auctions"`.
#[must_use]
pub fn platform_baseline(platform: &str) -> f64 {
    let key = platform.trim().to_lowercase().replace(' ', "_");
    PLATFORM_BASELINES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEFAULT_BASELINE, |&(_, baseline)| baseline)
}

/// Score delta and audit line for the shape of a (non-blank) seller ID.
fn score_seller_id(seller_id: &str) -> (f64, String) {
    if HANDLE_RE.is_match(seller_id) {
        (0.05, format!("Identifiable handle: {seller_id}"))
    } else if seller_id.chars().count() < 4 {
        (-0.05, format!("Very short seller ID: {seller_id}"))
    } else {
        (0.0, format!("Seller ID present: {seller_id}"))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score a seller's trustworthiness and veto when it falls below `min_trust`.
///
/// A blank `seller_id` short-circuits to [`SourceVerdict::MissingSellerId`]
/// with a score of zero before any signal is considered.
#[must_use]
pub fn source_gate(
    description: &str,
    seller_id: &str,
    platform: &str,
    location: &str,
    min_trust: f64,
) -> SourceResult {
    let seller_id = seller_id.trim();
    if seller_id.is_empty() {
        return SourceResult {
            verdict: SourceVerdict::MissingSellerId,
            trust_score: 0.0,
            min_trust,
            signals_positive: Vec::new(),
            signals_negative: vec!["No seller identification provided".to_string()],
            reason: "Cannot evaluate source without a seller ID. \
                     Anonymous listings are automatically flagged."
                .to_string(),
        };
    }

    let mut positives = Vec::new();
    let mut negatives = Vec::new();

    let baseline = platform_baseline(platform);
    positives.push(format!("Platform baseline ({platform}): {baseline:.2}"));
    let mut score = baseline;

    let (id_delta, id_signal) = score_seller_id(seller_id);
    score += id_delta;
    if id_delta >= 0.0 {
        positives.push(id_signal);
    } else {
        negatives.push(id_signal);
    }

    // A blank description simply contributes no signals here; the identity
    // gate is the one that vetoes empty text.
    for rule in RED_FLAGS.all_matches(description).unwrap_or_default() {
        score += rule.effect;
        negatives.push(format!("{} ({:+.2})", rule.label, rule.effect));
    }
    for rule in TRUST_SIGNALS.all_matches(description).unwrap_or_default() {
        score += rule.effect;
        positives.push(format!("{} ({:+.2})", rule.label, rule.effect));
    }

    let location = location.trim();
    if location.chars().count() > 3 {
        score += LOCATION_BONUS;
        positives.push(format!("Location disclosed: {location} ({LOCATION_BONUS:+.2})"));
    }

    let score = round2(score.clamp(0.0, 1.0));

    let (verdict, reason) = if score >= min_trust {
        (
            SourceVerdict::Pass,
            format!(
                "Seller trust score {score:.2} meets threshold {min_trust:.2}. {} positive signals, {} risk flags.",
                positives.len(),
                negatives.len()
            ),
        )
    } else if score >= HIGH_RISK_CEILING {
        (
            SourceVerdict::Caution,
            format!(
                "Seller trust score {score:.2} below threshold {min_trust:.2}. \
                 Elevated risk, proceed only with buyer protection."
            ),
        )
    } else {
        (
            SourceVerdict::HighRisk,
            format!(
                "Seller trust score {score:.2} critically low. \
                 Multiple risk indicators detected. Do not proceed."
            ),
        )
    };

    SourceResult {
        verdict,
        trust_score: score,
        min_trust,
        signals_positive: positives,
        signals_negative: negatives,
        reason,
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
