//! # Name Normalizer
//!
//! Maps a raw item name to the canonical key it is stored under on add.
//!
//! The rule is small: trim, lower-case, and pluralize by
//! appending `s` unless the name already ends in `s`.
//!
//! ## Known Limitations
//!
//! The heuristic is lossy and is kept as-is:
//! - Singulars that already end in `s` are left alone ("bus" stays "bus",
//!   not "buses").
//! - Irregular plurals are not handled ("mouse" becomes "mouses").
//! - "berry" becomes "berrys", so it will not meet "berries" stored under
//!   a different spelling.
//!
//! The remove path compensates for most of this through the fallback chain
//! in [`crate::matcher`].

use crate::primitives::{MAX_ITEM_NAME_LENGTH, PLURAL_SUFFIX};
use crate::types::CartError;

/// Produce the canonical storage key for a raw item name.
///
/// # Example
/// ```
/// use grocer_core::normalize::normalize_item_name;
///
/// assert_eq!(normalize_item_name("  Apple ").unwrap(), "apples");
/// assert_eq!(normalize_item_name("EGGS").unwrap(), "eggs");
/// ```
pub fn normalize_item_name(raw: &str) -> Result<String, CartError> {
    let mut key = fold_checked(raw, MAX_ITEM_NAME_LENGTH)?;
    if !key.ends_with(PLURAL_SUFFIX) {
        key.push(PLURAL_SUFFIX);
    }
    Ok(key)
}

/// Trim and lower-case a name. This is the comparison form used by the
/// fuzzy matcher; it does not pluralize.
#[must_use]
pub fn fold_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Fold a raw name and enforce the non-empty and length limits.
///
/// The length is measured on the folded form: lower-casing can grow a name
/// ("İ" is two bytes, its lower case "i̇" is three).
pub(crate) fn fold_checked(raw: &str, limit: usize) -> Result<String, CartError> {
    let folded = fold_name(raw);
    if folded.is_empty() {
        return Err(CartError::EmptyItemName);
    }
    if folded.len() > limit {
        return Err(CartError::ItemNameTooLong(folded.len(), limit));
    }
    Ok(folded)
}

/// Strip every trailing plural suffix ("glasss" → "gla").
#[must_use]
pub fn stem(folded: &str) -> &str {
    folded.trim_end_matches(PLURAL_SUFFIX)
}

// =============================================================================
// TESTS
// =============================================================================
