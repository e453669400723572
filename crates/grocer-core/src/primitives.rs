//! # Primitives
//!
//! Hardcoded runtime constants for the Grocer core.
//!
//! These are compiled into the binary and are immutable at runtime.

/// Suffix appended by the pluralization heuristic, and stripped by the
/// stem-equivalence rule of the remove fallback chain.
pub const PLURAL_SUFFIX: char = 's';

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for item names, in bytes, after trimming and
/// lower-casing.
///
/// Names longer than this are rejected before they reach the store.
pub const MAX_ITEM_NAME_LENGTH: usize = 256;

/// Maximum length of a stored key: a name at the limit plus the plural
/// suffix. Remove accepts anything up to this so every stored key can be
/// named verbatim.
pub const MAX_KEY_LENGTH: usize = MAX_ITEM_NAME_LENGTH + 1;
