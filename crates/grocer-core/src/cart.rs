//! # Cart Store
//!
//! The authoritative mapping from canonical key to quantity.
//!
//! - Insertion order is preserved and shows up in every snapshot.
//! - A key is present only while its quantity is at least 1.
//! - Remove resolves names through [`crate::matcher`], so callers do not
//!   have to replicate the add-time normalization.
//!
//! `Cart` itself is not synchronized. Callers that share one across tasks
//! wrap it in a lock and hold the lock for the whole call; every method here
//! is a complete check-then-act sequence.

use crate::matcher::{MatchRule, find_match};
use crate::normalize::fold_checked;
use crate::primitives::MAX_KEY_LENGTH;
use crate::types::{CartError, CartSnapshot, ItemSnapshot, Quantity};

/// One stored line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CartEntry {
    key: String,
    quantity: u64,
}

/// How a remove request was resolved against the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// A key was found and its quantity reduced or dropped.
    Removed {
        /// The stored key that matched.
        key: String,
        /// Rule that selected `key`.
        rule: MatchRule,
        /// Units actually taken out, capped at what was stored.
        removed: u64,
        /// Whether the key is gone from the cart.
        emptied: bool,
        snapshot: CartSnapshot,
    },
    /// Neither the exact lookup nor the fallback chain found a key.
    NotFound { snapshot: CartSnapshot },
}

impl RemoveOutcome {
    /// Snapshot after the operation.
    #[must_use]
    pub fn snapshot(&self) -> &CartSnapshot {
        match self {
            Self::Removed { snapshot, .. } | Self::NotFound { snapshot } => snapshot,
        }
    }

    /// True if something was removed.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }
}

/// The cart: canonical key to strictly positive quantity.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units under `key`.
    ///
    /// `key` is stored as given; run it through
    /// [`crate::normalize::normalize_item_name`] first. An existing key is
    /// topped up with saturating arithmetic, a new key goes to the end.
    pub fn add(&mut self, key: &str, quantity: i64) -> Result<CartSnapshot, CartError> {
        let quantity = Quantity::new(quantity)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CartError::EmptyItemName);
        }

        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity.get()),
            None => self.entries.push(CartEntry {
                key: key.to_string(),
                quantity: quantity.get(),
            }),
        }

        Ok(self.view())
    }

    /// Remove up to `quantity` units of whatever `raw_name` refers to.
    ///
    /// The raw name is tried verbatim first, then through the fallback
    /// chain. A miss is reported as [`RemoveOutcome::NotFound`] and leaves
    /// the cart untouched.
    pub fn remove(&mut self, raw_name: &str, quantity: i64) -> Result<RemoveOutcome, CartError> {
        let quantity = Quantity::new(quantity)?.get();
        fold_checked(raw_name, MAX_KEY_LENGTH)?;

        let Some((index, rule)) = find_match(self.keys(), raw_name) else {
            return Ok(RemoveOutcome::NotFound {
                snapshot: self.view(),
            });
        };

        let Some(entry) = self.entries.get_mut(index) else {
            return Err(CartError::Internal(format!(
                "matched position {index} is outside the cart"
            )));
        };

        let key = entry.key.clone();
        let (removed, emptied) = if entry.quantity <= quantity {
            let stored = entry.quantity;
            self.entries.remove(index);
            (stored, true)
        } else {
            entry.quantity -= quantity;
            (quantity, false)
        };

        Ok(RemoveOutcome::Removed {
            key,
            rule,
            removed,
            emptied,
            snapshot: self.view(),
        })
    }

    /// Copy out the current contents.
    #[must_use]
    pub fn view(&self) -> CartSnapshot {
        CartSnapshot::new(
            self.entries
                .iter()
                .map(|entry| ItemSnapshot {
                    item: entry.key.clone(),
                    quantity: entry.quantity,
                })
                .collect(),
        )
    }

    /// Drop everything. Returns how many distinct item types were removed.
    pub fn clear(&mut self) -> usize {
        let cleared = self.entries.len();
        self.entries.clear();
        cleared
    }

    /// Stored quantity for an exact key.
    #[must_use]
    pub fn quantity_of(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.quantity)
    }

    /// Number of distinct item types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + Clone {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_inserts_then_accumulates() {
        let mut cart = Cart::new();
        cart.add("apples", 2).expect("add");
        let snapshot = cart.add("apples", 3).expect("add");

        assert_eq!(snapshot.quantity_of("apples"), Some(5));
        assert_eq!(snapshot.total_items, 5);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn add_saturates() {
        let mut cart = Cart::new();
        cart.add("eggs", i64::MAX).expect("add");
        cart.add("eggs", i64::MAX).expect("add");
        cart.add("eggs", i64::MAX).expect("add");
        assert_eq!(cart.quantity_of("eggs"), Some(u64::MAX));
    }

    #[test]
    fn add_rejects_non_positive() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add("apples", 0),
            Err(CartError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add("apples", -4),
            Err(CartError::InvalidQuantity(-4))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add("milks", 1).expect("add");
        cart.add("apples", 1).expect("add");
        cart.add("breads", 1).expect("add");
        cart.add("milks", 1).expect("add");

        let keys: Vec<_> = cart.keys().collect();
        assert_eq!(keys, vec!["milks", "apples", "breads"]);
    }

    #[test]
    fn partial_remove_decrements() {
        let mut cart = Cart::new();
        cart.add("eggs", 12).expect("add");

        let outcome = cart.remove("eggs", 5).expect("remove");
        assert!(matches!(
            &outcome,
            RemoveOutcome::Removed {
                key,
                rule: MatchRule::Exact,
                removed: 5,
                emptied: false,
                ..
            } if key == "eggs"
        ));
        assert_eq!(outcome.snapshot().quantity_of("eggs"), Some(7));
        assert_eq!(outcome.snapshot().total_items, 7);
    }

    #[test]
    fn over_remove_caps_at_stored() {
        let mut cart = Cart::new();
        cart.add("apples", 2).expect("add");

        let outcome = cart.remove("apples", 10).expect("remove");
        assert!(matches!(
            outcome,
            RemoveOutcome::Removed {
                removed: 2,
                emptied: true,
                ..
            }
        ));
        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of("apples"), None);
    }

    #[test]
    fn remove_falls_back_to_fuzzy() {
        let mut cart = Cart::new();
        cart.add("bananas", 2).expect("add");

        let outcome = cart.remove("Banana", 1).expect("remove");
        assert!(matches!(
            outcome,
            RemoveOutcome::Removed {
                rule: MatchRule::RequestPlusSuffix,
                removed: 1,
                ..
            }
        ));
        assert_eq!(cart.quantity_of("bananas"), Some(1));
    }

    #[test]
    fn remove_missing_is_reported() {
        let mut cart = Cart::new();
        cart.add("apples", 1).expect("add");

        let outcome = cart.remove("kiwi", 1).expect("remove");
        assert!(!outcome.is_removed());
        assert_eq!(outcome.snapshot().quantity_of("apples"), Some(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_validates_before_lookup() {
        let mut cart = Cart::new();
        cart.add("apples", 1).expect("add");

        assert!(matches!(
            cart.remove("apples", 0),
            Err(CartError::InvalidQuantity(0))
        ));
        assert!(matches!(cart.remove("  ", 1), Err(CartError::EmptyItemName)));
        assert_eq!(cart.quantity_of("apples"), Some(1));
    }

    #[test]
    fn clear_counts_types_and_is_idempotent() {
        let mut cart = Cart::new();
        cart.add("apples", 3).expect("add");
        cart.add("eggs", 12).expect("add");

        assert_eq!(cart.clear(), 2);
        assert_eq!(cart.clear(), 0);
        assert!(cart.view().is_empty());
        assert_eq!(cart.view().total_items, 0);
    }
}
