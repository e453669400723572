//! # Fuzzy Matcher
//!
//! Resolves a raw name from a remove request to one of the keys already in
//! the cart.
//!
//! Lookup runs in two phases:
//! 1. Exact: the raw name, verbatim, against every key.
//! 2. Fallback: the folded (trimmed, lower-cased) raw name against each
//!    folded key, testing the rules of [`MatchRule`] in order. Keys are
//!    visited in insertion order and the first key satisfying any rule wins.
//!
//! There is no scoring. Ties go to the older key.

use crate::normalize::{fold_name, stem};
use crate::primitives::PLURAL_SUFFIX;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rule selected the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// The raw name was a stored key, byte for byte.
    Exact,
    /// (a) Equal after trimming and lower-casing.
    CaseInsensitive,
    /// (b) Request is the singular of the key ("banana" → "bananas").
    RequestPlusSuffix,
    /// (c) Key is the singular of the request ("apples" → "apple").
    KeyPlusSuffix,
    /// (d) Equal once every trailing `s` is stripped from both.
    SharedStem,
}

impl MatchRule {
    /// Short label for logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::RequestPlusSuffix => "request_plus_suffix",
            Self::KeyPlusSuffix => "key_plus_suffix",
            Self::SharedStem => "shared_stem",
        }
    }

    /// True for every rule except `Exact`.
    #[must_use]
    pub const fn is_fuzzy(self) -> bool {
        !matches!(self, Self::Exact)
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Test a folded request name against a single stored key.
///
/// `needle` must already be folded. Returns the first rule that holds.
#[must_use]
pub fn equivalence(needle: &str, key: &str) -> Option<MatchRule> {
    let candidate = fold_name(key);

    if needle == candidate {
        return Some(MatchRule::CaseInsensitive);
    }
    if is_suffixed(&candidate, needle) {
        return Some(MatchRule::RequestPlusSuffix);
    }
    if is_suffixed(needle, &candidate) {
        return Some(MatchRule::KeyPlusSuffix);
    }
    if stem(needle) == stem(&candidate) {
        return Some(MatchRule::SharedStem);
    }
    None
}

/// `longer == shorter + "s"`, without allocating.
fn is_suffixed(longer: &str, shorter: &str) -> bool {
    longer
        .strip_suffix(PLURAL_SUFFIX)
        .is_some_and(|rest| rest == shorter)
}

/// Find the position of the key that `raw_name` refers to.
///
/// `keys` must be in insertion order.
pub fn find_match<'a, I>(keys: I, raw_name: &str) -> Option<(usize, MatchRule)>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let keys = keys.into_iter();

    if let Some(index) = keys.clone().position(|key| key == raw_name) {
        return Some((index, MatchRule::Exact));
    }

    let needle = fold_name(raw_name);
    keys.enumerate()
        .find_map(|(index, key)| equivalence(&needle, key).map(|rule| (index, rule)))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_in_order() {
        assert_eq!(equivalence("eggs", "Eggs"), Some(MatchRule::CaseInsensitive));
        assert_eq!(
            equivalence("banana", "bananas"),
            Some(MatchRule::RequestPlusSuffix)
        );
        assert_eq!(equivalence("apples", "apple"), Some(MatchRule::KeyPlusSuffix));
        assert_eq!(equivalence("glass", "glasses"), None);
        assert_eq!(equivalence("bus", "bu"), Some(MatchRule::KeyPlusSuffix));
        assert_eq!(equivalence("kisss", "kis"), Some(MatchRule::SharedStem));
        assert_eq!(equivalence("kiwi", "apples"), None);
    }

    #[test]
    fn exact_wins_over_earlier_fuzzy_candidate() {
        let keys = ["Apples", "apples"];
        assert_eq!(
            find_match(keys.iter().copied(), "apples"),
            Some((1, MatchRule::Exact))
        );
    }

    #[test]
    fn first_fuzzy_candidate_in_order_wins() {
        let keys = ["milks", "apple", "apples"];
        assert_eq!(
            find_match(keys.iter().copied(), "Apple "),
            Some((1, MatchRule::CaseInsensitive))
        );

        let keys = ["apples", "apple"];
        assert_eq!(
            find_match(keys.iter().copied(), "APPLE"),
            Some((0, MatchRule::RequestPlusSuffix))
        );
    }

    #[test]
    fn no_match_on_empty_or_unrelated() {
        let empty: [&str; 0] = [];
        assert_eq!(find_match(empty.iter().copied(), "kiwi"), None);

        let keys = ["apples", "bananas"];
        assert_eq!(find_match(keys.iter().copied(), "kiwi"), None);
    }

    #[test]
    fn rule_labels() {
        assert_eq!(MatchRule::SharedStem.to_string(), "shared_stem");
        assert!(!MatchRule::Exact.is_fuzzy());
        assert!(MatchRule::CaseInsensitive.is_fuzzy());
    }
}
