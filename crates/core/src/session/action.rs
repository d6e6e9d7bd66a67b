//! Session actions

use uuid::Uuid;

use crate::{
    items::LineItem,
    session::{DeliveryInfo, Identity, PaymentMethod},
};

/// The closed set of session mutations.
///
/// Each variant carries its own payload, so an action that does not apply
/// cannot be constructed and exhaustiveness is checked at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Upsert a cart line by product id. Replaces the stored quantity for
    /// an already-present product. Stock is the caller's concern: consult
    /// [`crate::items::LineItem::ensure_in_stock`] first.
    AddItem(LineItem),

    /// Remove the line for a product id, if present. Idempotent.
    RemoveItem(Uuid),

    /// Empty the cart.
    ClearItems,

    /// Overwrite the delivery address.
    SaveDeliveryInfo(DeliveryInfo),

    /// Overwrite the payment provider selection.
    SavePaymentMethod(PaymentMethod),

    /// Record the signed-in shopper.
    Login(Identity),

    /// Clear identity, cart, and checkout selections.
    Logout,
}
