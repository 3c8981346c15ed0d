//! Ordered, case-insensitive pattern rules shared by the gates.
//!
//! A [`RuleSet`] keeps its rules in declaration order because order carries
//! meaning: veto-style gates take the first match, scoring-style gates fold
//! every match. Rule sets are built once into `static LazyLock` tables by the
//! gate modules and only ever read afterwards.

use regex::{Regex, RegexBuilder};

use crate::error::MatchError;

/// One `(pattern, label, effect)` triple.
#[derive(Debug, Clone)]
pub struct Rule<E> {
    pattern: Regex,
    /// Human-readable description reported when the rule matches.
    pub label: &'static str,
    /// What a match means to the caller: a verdict code, a weight, or `()`.
    pub effect: E,
}

impl<E> Rule<E> {
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// An ordered list of [`Rule`]s.
#[derive(Debug, Clone)]
pub struct RuleSet<E> {
    rules: Vec<Rule<E>>,
}

impl<E: Clone> RuleSet<E> {
    /// Compile `(pattern, label, effect)` specs into a case-insensitive rule set,
    /// preserving their order.
    ///
    /// # Errors
    ///
    /// Returns the first `regex::Error` if any pattern fails to compile.
    pub fn compile(specs: &[(&str, &'static str, E)]) -> Result<Self, regex::Error> {
        let rules = specs
            .iter()
            .map(|(pattern, label, effect)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|pattern| Rule {
                        pattern,
                        label: *label,
                        effect: effect.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }
}

impl<E> RuleSet<E> {
    /// Return the first rule, in list order, whose pattern matches `text`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyText`] when `text` is empty or whitespace-only.
    pub fn first_match(&self, text: &str) -> Result<Option<&Rule<E>>, MatchError> {
        ensure_not_blank(text)?;
        Ok(self.rules.iter().find(|rule| rule.is_match(text)))
    }

    /// Return every matching rule, in list order.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyText`] when `text` is empty or whitespace-only.
    pub fn all_matches(&self, text: &str) -> Result<Vec<&Rule<E>>, MatchError> {
        ensure_not_blank(text)?;
        Ok(self.rules.iter().filter(|rule| rule.is_match(text)).collect())
    }

    /// Whether any rule matches `text`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyText`] when `text` is empty or whitespace-only.
    pub fn any_match(&self, text: &str) -> Result<bool, MatchError> {
        Ok(self.first_match(text)?.is_some())
    }
}

/// Whether `text` is empty or whitespace-only.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn ensure_not_blank(text: &str) -> Result<(), MatchError> {
    if is_blank(text) {
        Err(MatchError::EmptyText)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Code {
        First,
        Second,
    }

    fn ordered_rules() -> RuleSet<Code> {
        RuleSet::compile(&[
            (r"\bapple\b", "apple", Code::First),
            (r"\b(?:apple|pear)\b", "fruit", Code::Second),
        ])
        .unwrap()
    }

    #[test]
    fn first_match_respects_list_order() {
        let rules = ordered_rules();
        let hit = rules.first_match("an apple and a pear").unwrap().unwrap();
        assert_eq!(hit.effect, Code::First);
        assert_eq!(hit.label, "apple");
    }

    #[test]
    fn first_match_falls_through_to_later_rule() {
        let rules = ordered_rules();
        let hit = rules.first_match("just a pear").unwrap().unwrap();
        assert_eq!(hit.effect, Code::Second);
    }

    #[test]
    fn first_match_none_when_nothing_matches() {
        let rules = ordered_rules();
        assert!(rules.first_match("a banana").unwrap().is_none());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let rules = ordered_rules();
        assert!(rules.any_match("APPLE").unwrap());
    }

    #[test]
    fn blank_text_is_an_error_not_a_miss() {
        let rules = ordered_rules();
        assert_eq!(rules.first_match("").unwrap_err(), MatchError::EmptyText);
        assert_eq!(rules.all_matches("  \n\t").unwrap_err(), MatchError::EmptyText);
    }

    #[test]
    fn all_matches_returns_every_hit_in_order() {
        let rules = ordered_rules();
        let labels: Vec<_> = rules
            .all_matches("apple")
            .unwrap()
            .iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["apple", "fruit"]);
    }

    #[test]
    fn compile_rejects_invalid_pattern() {
        let result = RuleSet::compile(&[(r"(unclosed", "broken", ())]);
        assert!(result.is_err());
    }

    #[test]
    fn is_blank_detects_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" x "));
    }
}
