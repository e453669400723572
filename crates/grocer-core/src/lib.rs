//! # grocer-core
//!
//! The cart reconciliation engine for Grocer - THE LOGIC.
//!
//! Items are added under a canonical key (trimmed, lower-cased, naively
//! pluralized) and removed by whatever loose variant the user happened to
//! say: "remove 2 apple" finds "apples", "Eggs" finds "eggs".
//!
//! ## Components
//!
//! - `normalize` → raw name to canonical key (add path)
//! - `matcher` → raw name to an existing key (remove path)
//! - `cart` → the store: add / remove / view / clear
//! - `engine` → the two composed, rendered as `CartResponse`
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Has NO async, NO network, NO logging dependencies (pure Rust)
//! - Is synchronous; sharing a `Cart` is the caller's job (one lock per call)
//! - Never panics; every failure is a `CartError` or a reported outcome

// =============================================================================
// MODULES
// =============================================================================

pub mod cart;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use types::{
    CartAction, CartError, CartItemRequest, CartResponse, CartSnapshot, ItemSnapshot, Quantity,
};

pub use cart::{Cart, RemoveOutcome};
pub use engine::{Applied, CartEngine};
pub use matcher::{MatchRule, find_match};
pub use normalize::normalize_item_name;
