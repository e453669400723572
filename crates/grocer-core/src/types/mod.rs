//! # Core Type Definitions
//!
//! This module contains the value types shared by the store and its callers:
//! - Quantities (`Quantity`)
//! - Request shape (`CartAction`, `CartItemRequest`)
//! - Output structures (`ItemSnapshot`, `CartSnapshot`, `CartResponse`)
//! - Error types (`CartError`)
//!
//! ## Arithmetic Guarantees
//!
//! Stored quantities are unsigned and strictly positive. Accumulation uses
//! saturating arithmetic so repeated adds can never overflow.

use crate::normalize::fold_checked;
use crate::primitives::MAX_KEY_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// QUANTITY
// =============================================================================

/// A validated, strictly positive item count.
///
/// Callers hand the store signed integers (that is what arrives over the
/// wire); `Quantity::new` is the only way in and rejects anything `<= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Quantity(u64);

impl Quantity {
    /// Validate a raw requested quantity.
    pub fn new(raw: i64) -> Result<Self, CartError> {
        if raw <= 0 {
            return Err(CartError::InvalidQuantity(raw));
        }
        Ok(Self(raw.unsigned_abs()))
    }

    /// Get the raw count.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ACTION
// =============================================================================

/// What a request wants to do with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
    Add,
    Remove,
}

impl CartAction {
    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CartAction {
    type Err = CartError;

    /// Parses `add` / `remove`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = s.trim();
        if action.eq_ignore_ascii_case("add") {
            Ok(Self::Add)
        } else if action.eq_ignore_ascii_case("remove") {
            Ok(Self::Remove)
        } else {
            Err(CartError::UnknownAction(s.to_string()))
        }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// One `(action, item_name, quantity)` triple, as produced by the HTTP layer
/// or extracted from an utterance by a language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemRequest {
    /// Raw, user-supplied item name.
    pub item_name: String,
    /// Requested count. Validated, not trusted.
    pub quantity: i64,
    pub action: CartAction,
}

impl CartItemRequest {
    /// Create a new request.
    #[must_use]
    pub fn new(action: CartAction, item_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            action,
        }
    }

    /// Check the request without touching any cart.
    ///
    /// Rejects non-positive quantities and names that are empty or longer
    /// than `MAX_KEY_LENGTH` once trimmed and lower-cased.
    pub fn validate(&self) -> Result<Quantity, CartError> {
        fold_checked(&self.item_name, MAX_KEY_LENGTH)?;
        Quantity::new(self.quantity)
    }
}

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// A single `{item, quantity}` line of a cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub item: String,
    pub quantity: u64,
}

/// An immutable copy of the cart at one point in time.
///
/// Items are in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<ItemSnapshot>,
    pub total_items: u64,
}

impl CartSnapshot {
    /// Build a snapshot, computing the total.
    #[must_use]
    pub fn new(items: Vec<ItemSnapshot>) -> Self {
        let total_items = items
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.quantity));
        Self { items, total_items }
    }

    /// Quantity stored under `key`, if present.
    #[must_use]
    pub fn quantity_of(&self, key: &str) -> Option<u64> {
        self.items
            .iter()
            .find(|line| line.item == key)
            .map(|line| line.quantity)
    }

    /// Number of distinct item types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the snapshot holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// The outcome of a cart operation as shown to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub cart_items: Vec<ItemSnapshot>,
    #[serde(default)]
    pub total_items: u64,
}

impl CartResponse {
    /// A successful outcome carrying the given snapshot.
    pub fn success(message: impl Into<String>, snapshot: CartSnapshot) -> Self {
        Self {
            success: true,
            message: message.into(),
            cart_items: snapshot.items,
            total_items: snapshot.total_items,
        }
    }

    /// A reported (non-fault) failure carrying the unchanged snapshot.
    pub fn failure(message: impl Into<String>, snapshot: CartSnapshot) -> Self {
        Self {
            success: false,
            message: message.into(),
            cart_items: snapshot.items,
            total_items: snapshot.total_items,
        }
    }

    /// A rejected request. No snapshot is attached.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            cart_items: Vec::new(),
            total_items: 0,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Grocer system.
///
/// "Item not in cart" is absent: it is a reported outcome
/// (`RemoveOutcome::NotFound`), not an error.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity was zero or negative.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// Item name was empty after trimming.
    #[error("Item name must not be empty")]
    EmptyItemName,

    /// Item name exceeded the length limit.
    #[error("Item name length {0} exceeds maximum {1} bytes")]
    ItemNameTooLong(usize, usize),

    /// Action was neither `add` nor `remove`.
    #[error("Unknown cart action: '{0}' (expected 'add' or 'remove')")]
    UnknownAction(String),

    /// Action was valid but sent to the wrong operation.
    #[error("Action '{found}' does not match operation '{expected}'")]
    ActionMismatch {
        expected: CartAction,
        found: CartAction,
    },

    /// Unexpected failure outside the request's control.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CartError {
    /// True for every variant caused by a bad request rather than a fault.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_rejects_zero_and_negative() {
        assert!(matches!(Quantity::new(0), Err(CartError::InvalidQuantity(0))));
        assert!(matches!(
            Quantity::new(-1),
            Err(CartError::InvalidQuantity(-1))
        ));
        assert_eq!(Quantity::new(3).expect("valid").get(), 3);
    }

    #[test]
    fn action_parses_case_insensitively() {
        assert_eq!("add".parse::<CartAction>().expect("add"), CartAction::Add);
        assert_eq!(
            " REMOVE ".parse::<CartAction>().expect("remove"),
            CartAction::Remove
        );
        assert!(matches!(
            "delete".parse::<CartAction>(),
            Err(CartError::UnknownAction(_))
        ));
    }

    #[test]
    fn request_validation() {
        assert!(CartItemRequest::new(CartAction::Add, "apple", 1).validate().is_ok());
        assert!(matches!(
            CartItemRequest::new(CartAction::Add, "   ", 1).validate(),
            Err(CartError::EmptyItemName)
        ));
        assert!(matches!(
            CartItemRequest::new(CartAction::Remove, "apple", 0).validate(),
            Err(CartError::InvalidQuantity(0))
        ));
        let long = "a".repeat(MAX_KEY_LENGTH + 1);
        assert!(matches!(
            CartItemRequest::new(CartAction::Add, long, 1).validate(),
            Err(CartError::ItemNameTooLong(_, _))
        ));
    }

    #[test]
    fn snapshot_total_and_lookup() {
        let snapshot = CartSnapshot::new(vec![
            ItemSnapshot {
                item: "apples".to_string(),
                quantity: 3,
            },
            ItemSnapshot {
                item: "eggs".to_string(),
                quantity: 12,
            },
        ]);
        assert_eq!(snapshot.total_items, 15);
        assert_eq!(snapshot.quantity_of("eggs"), Some(12));
        assert_eq!(snapshot.quantity_of("milk"), None);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn internal_is_not_invalid_argument() {
        assert!(CartError::EmptyItemName.is_invalid_argument());
        assert!(!CartError::Internal("boom".into()).is_invalid_argument());
    }
}
