//! Shopper session
//!
//! The single authoritative in-memory representation of the shopper's cart
//! and identity, mutated exclusively through [`Action`]s and mirrored into
//! durable storage by [`store::SessionStore`].

mod action;
pub mod store;

pub use action::Action;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::items::LineItem;

/// Delivery address captured once per checkout session.
///
/// All fields are required; resubmission overwrites the previous value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    /// Recipient's full name.
    pub full_name: String,

    /// Street address.
    pub address: String,

    /// City or town.
    pub city: String,

    /// Postal code.
    pub postcode: String,

    /// Country.
    pub country: String,
}

/// Supported payment providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Pay with PayPal.
    PayPal,

    /// Pay with Stripe.
    Stripe,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PayPal => f.write_str("PayPal"),
            Self::Stripe => f.write_str("Stripe"),
        }
    }
}

/// The signed-in shopper. Absence means "not logged in" and gates every
/// checkout step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The shopper's user id.
    pub user: Uuid,

    /// Display name.
    pub name: String,

    /// Account email.
    pub email: String,

    /// Whether the shopper may use the back office.
    pub admin: bool,

    /// Opaque bearer token presented to the order and account interfaces.
    pub token: String,
}

/// Aggregate session state: cart lines, checkout selections, and identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Cart lines, at most one per product id.
    pub cart_items: Vec<LineItem>,

    /// Delivery address, once captured.
    pub delivery_info: Option<DeliveryInfo>,

    /// Selected payment provider, once captured.
    pub payment_method: Option<PaymentMethod>,

    /// Signed-in shopper, if any.
    pub identity: Option<Identity>,
}

impl SessionState {
    /// Apply an action to the state. Never fails: the action set is closed
    /// and every variant has a defined effect on every state.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::AddItem(item) => self.upsert_item(item),
            Action::RemoveItem(product) => {
                self.cart_items.retain(|line| line.product != product);
            }
            Action::ClearItems => self.cart_items.clear(),
            Action::SaveDeliveryInfo(info) => self.delivery_info = Some(info),
            Action::SavePaymentMethod(method) => self.payment_method = Some(method),
            Action::Login(identity) => self.identity = Some(identity),
            Action::Logout => *self = Self::default(),
        }
    }

    /// Total units across all cart lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart_items.iter().map(|line| line.quantity).sum()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn cart_is_empty(&self) -> bool {
        self.cart_items.is_empty()
    }

    // Replace-on-match: a new quantity for a known product replaces the old
    // one, it is not added to it.
    fn upsert_item(&mut self, item: LineItem) {
        if let Some(existing) = self
            .cart_items
            .iter_mut()
            .find(|line| line.product == item.product)
        {
            *existing = item;
        } else {
            self.cart_items.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn line(product: Uuid, quantity: u32) -> LineItem {
        LineItem {
            product,
            slug: "widget".to_string(),
            name: "Widget".to_string(),
            image: "/images/widget.jpg".to_string(),
            price: Decimal::new(999, 2),
            quantity,
        }
    }

    fn identity() -> Identity {
        Identity {
            user: Uuid::now_v7(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            admin: false,
            token: "sf_v1_test.token".to_string(),
        }
    }

    fn delivery_info() -> DeliveryInfo {
        DeliveryInfo {
            full_name: "Ada Lovelace".to_string(),
            address: "1 Analytical Row".to_string(),
            city: "London".to_string(),
            postcode: "N1 9GU".to_string(),
            country: "United Kingdom".to_string(),
        }
    }

    #[test]
    fn distinct_products_get_one_line_each() {
        let (first, second) = (Uuid::now_v7(), Uuid::now_v7());
        let mut state = SessionState::default();

        state.apply(Action::AddItem(line(first, 1)));
        state.apply(Action::AddItem(line(second, 2)));
        state.apply(Action::AddItem(line(first, 5)));

        assert_eq!(state.cart_items.len(), 2);
        let first_line = state
            .cart_items
            .iter()
            .find(|l| l.product == first)
            .expect("first product must still be present");
        assert_eq!(first_line.quantity, 5, "quantity replaces, not merges");
    }

    #[test]
    fn add_then_remove_restores_the_prior_cart() {
        let product = Uuid::now_v7();
        let mut state = SessionState::default();
        state.apply(Action::AddItem(line(Uuid::now_v7(), 1)));
        let before = state.clone();

        state.apply(Action::AddItem(line(product, 3)));
        state.apply(Action::RemoveItem(product));

        assert_eq!(state, before);
    }

    #[test]
    fn remove_of_absent_product_is_a_no_op() {
        let mut state = SessionState::default();
        state.apply(Action::AddItem(line(Uuid::now_v7(), 1)));
        let before = state.clone();

        state.apply(Action::RemoveItem(Uuid::now_v7()));

        assert_eq!(state, before);
    }

    #[test]
    fn logout_resets_everything() {
        let mut state = SessionState::default();
        state.apply(Action::AddItem(line(Uuid::now_v7(), 2)));
        state.apply(Action::SaveDeliveryInfo(delivery_info()));
        state.apply(Action::SavePaymentMethod(PaymentMethod::Stripe));
        state.apply(Action::Login(identity()));

        state.apply(Action::Logout);

        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut state = SessionState::default();
        state.apply(Action::AddItem(line(Uuid::now_v7(), 2)));
        state.apply(Action::AddItem(line(Uuid::now_v7(), 3)));

        assert_eq!(state.item_count(), 5);
    }
}
