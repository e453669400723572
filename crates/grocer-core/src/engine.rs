//! # Cart Engine
//!
//! Composes the normalizer and the store the way every caller needs them:
//! - add: normalize the raw name, then `Cart::add`
//! - remove: pass the raw name through untouched, then `Cart::remove`
//! - view / clear: straight through
//!
//! Every operation is rendered as a [`CartResponse`]. A request that fails
//! validation comes back as `Err(CartError)`; an item that is not in the
//! cart comes back as `Ok` with `success == false`.

use crate::cart::{Cart, RemoveOutcome};
use crate::matcher::MatchRule;
use crate::normalize::normalize_item_name;
use crate::types::{CartAction, CartError, CartItemRequest, CartResponse};

/// The result of one engine call: the response plus what happened, for
/// callers that want to log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub response: CartResponse,
    /// Stored key the request resolved to, if any.
    pub key: Option<String>,
    /// Set on remove when a key was matched.
    pub rule: Option<MatchRule>,
}

impl Applied {
    fn plain(response: CartResponse) -> Self {
        Self {
            response,
            key: None,
            rule: None,
        }
    }
}

/// Stateless entry points over a borrowed [`Cart`].
pub struct CartEngine;

impl CartEngine {
    /// Normalize `raw_name` and add `quantity` of it.
    pub fn add(cart: &mut Cart, raw_name: &str, quantity: i64) -> Result<Applied, CartError> {
        let key = normalize_item_name(raw_name)?;
        let snapshot = cart.add(&key, quantity)?;
        let message = format!("Successfully added {} {} to cart", quantity, raw_name);

        Ok(Applied {
            response: CartResponse::success(message, snapshot),
            key: Some(key),
            rule: None,
        })
    }

    /// Remove up to `quantity` of whatever `raw_name` refers to.
    pub fn remove(cart: &mut Cart, raw_name: &str, quantity: i64) -> Result<Applied, CartError> {
        match cart.remove(raw_name, quantity)? {
            RemoveOutcome::Removed {
                key,
                rule,
                removed,
                emptied,
                snapshot,
            } => {
                let message = if emptied {
                    format!("Removed all {} {} from cart", removed, raw_name)
                } else {
                    format!("Removed {} {} from cart", removed, raw_name)
                };
                Ok(Applied {
                    response: CartResponse::success(message, snapshot),
                    key: Some(key),
                    rule: Some(rule),
                })
            }
            RemoveOutcome::NotFound { snapshot } => Ok(Applied::plain(CartResponse::failure(
                format!("{} is not in your cart", raw_name),
                snapshot,
            ))),
        }
    }

    /// Dispatch a request on its action.
    pub fn apply(cart: &mut Cart, request: &CartItemRequest) -> Result<Applied, CartError> {
        match request.action {
            CartAction::Add => Self::add(cart, &request.item_name, request.quantity),
            CartAction::Remove => Self::remove(cart, &request.item_name, request.quantity),
        }
    }

    /// Describe the current contents.
    #[must_use]
    pub fn view(cart: &Cart) -> CartResponse {
        let snapshot = cart.view();
        let message = format!("Cart contains {} items", snapshot.total_items);
        CartResponse::success(message, snapshot)
    }

    /// Empty the cart.
    pub fn clear(cart: &mut Cart) -> CartResponse {
        let cleared = cart.clear();
        let message = format!(
            "Cart cleared successfully. Removed {} item types.",
            cleared
        );
        CartResponse::success(message, cart.view())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_normalizes_before_storing() {
        let mut cart = Cart::new();
        let applied = CartEngine::add(&mut cart, "Apple", 3).expect("add");

        assert!(applied.response.success);
        assert_eq!(applied.key.as_deref(), Some("apples"));
        assert_eq!(applied.response.message, "Successfully added 3 Apple to cart");
        assert_eq!(cart.quantity_of("apples"), Some(3));
    }

    #[test]
    fn remove_messages_distinguish_partial_and_full() {
        let mut cart = Cart::new();
        CartEngine::add(&mut cart, "egg", 12).expect("add");

        let partial = CartEngine::remove(&mut cart, "eggs", 5).expect("remove");
        assert_eq!(partial.response.message, "Removed 5 eggs from cart");
        assert_eq!(partial.rule, Some(MatchRule::Exact));

        let full = CartEngine::remove(&mut cart, "Eggs", 99).expect("remove");
        assert_eq!(full.response.message, "Removed all 7 Eggs from cart");
        assert_eq!(full.rule, Some(MatchRule::CaseInsensitive));
        assert_eq!(full.response.total_items, 0);
    }

    #[test]
    fn remove_not_found_is_a_response() {
        let mut cart = Cart::new();
        let applied = CartEngine::remove(&mut cart, "kiwi", 1).expect("remove");

        assert!(!applied.response.success);
        assert_eq!(applied.response.message, "kiwi is not in your cart");
        assert!(applied.key.is_none());
        assert!(applied.response.cart_items.is_empty());
    }

    #[test]
    fn apply_dispatches_on_action() {
        let mut cart = Cart::new();
        let add = CartItemRequest::new(CartAction::Add, "banana", 2);
        let remove = CartItemRequest::new(CartAction::Remove, "banana", 1);

        CartEngine::apply(&mut cart, &add).expect("add");
        let applied = CartEngine::apply(&mut cart, &remove).expect("remove");

        assert_eq!(applied.rule, Some(MatchRule::RequestPlusSuffix));
        assert_eq!(cart.quantity_of("bananas"), Some(1));
    }

    #[test]
    fn view_and_clear_messages() {
        let mut cart = Cart::new();
        CartEngine::add(&mut cart, "milk", 2).expect("add");
        CartEngine::add(&mut cart, "bread", 1).expect("add");

        assert_eq!(CartEngine::view(&cart).message, "Cart contains 3 items");

        let cleared = CartEngine::clear(&mut cart);
        assert_eq!(
            cleared.message,
            "Cart cleared successfully. Removed 2 item types."
        );
        assert_eq!(cleared.total_items, 0);
        assert!(cleared.cart_items.is_empty());
    }

    #[test]
    fn invalid_quantity_is_an_error() {
        let mut cart = Cart::new();
        assert!(matches!(
            CartEngine::add(&mut cart, "milk", 0),
            Err(CartError::InvalidQuantity(0))
        ));
        assert!(cart.is_empty());
    }
}
