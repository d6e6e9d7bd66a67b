//! Durable session storage
//!
//! The session survives reloads through four independent named slots (the
//! browser keeps them as cookies; tests keep them in a map). Each slot is
//! readable, writable, and deletable on its own, and a missing or malformed
//! payload always falls back to the empty default — corrupt storage never
//! fails a restore.

use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    items::LineItem,
    session::{Action, DeliveryInfo, Identity, PaymentMethod, SessionState},
};

/// Documented slot lifetime, matching the session-token lifetime.
pub const SLOT_TTL_DAYS: u32 = 30;

/// The four durable storage slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The cart-lines array.
    CartItems,

    /// The delivery address object.
    DeliveryInfo,

    /// The payment provider string.
    PaymentMethod,

    /// The signed-in shopper object.
    Identity,
}

impl Slot {
    /// Storage key for this slot.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CartItems => "cartItems",
            Self::DeliveryInfo => "deliveryInfo",
            Self::PaymentMethod => "paymentMethod",
            Self::Identity => "userInfo",
        }
    }

    /// All slots, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::CartItems,
        Self::DeliveryInfo,
        Self::PaymentMethod,
        Self::Identity,
    ];
}

/// Per-shopper durable storage with four JSON payload slots.
///
/// Writes are fire-and-forget: no transaction spans slots, and each slot is
/// independently re-derivable on the next checkout visit.
pub trait SlotStorage {
    /// Read a slot's raw payload, if present.
    fn read(&self, slot: Slot) -> Option<String>;

    /// Write a slot's raw payload, replacing any previous value.
    fn write(&mut self, slot: Slot, payload: String);

    /// Delete a slot, if present.
    fn delete(&mut self, slot: Slot);
}

/// In-memory slot storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: FxHashMap<Slot, String>,
}

impl SlotStorage for MemorySlots {
    fn read(&self, slot: Slot) -> Option<String> {
        self.slots.get(&slot).cloned()
    }

    fn write(&mut self, slot: Slot, payload: String) {
        self.slots.insert(slot, payload);
    }

    fn delete(&mut self, slot: Slot) {
        self.slots.remove(&slot);
    }
}

/// Session state bound to its durable storage.
///
/// Every mutation goes through [`SessionStore::apply`], which updates the
/// in-memory state and synchronizes the affected slots, so storage cleanup
/// is symmetric for every state-clearing action — clearing the cart deletes
/// the cart slot and logging out deletes all four.
#[derive(Debug, Clone)]
pub struct SessionStore<S: SlotStorage> {
    state: SessionState,
    slots: S,
}

impl<S: SlotStorage> SessionStore<S> {
    /// Restore a session from storage, tolerating missing or malformed
    /// slots.
    pub fn restore(slots: S) -> Self {
        let state = SessionState {
            cart_items: read_slot::<Vec<LineItem>>(&slots, Slot::CartItems).unwrap_or_default(),
            delivery_info: read_slot::<DeliveryInfo>(&slots, Slot::DeliveryInfo),
            payment_method: read_slot::<PaymentMethod>(&slots, Slot::PaymentMethod),
            identity: read_slot::<Identity>(&slots, Slot::Identity),
        };

        Self { state, slots }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The underlying storage.
    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Consume the store, returning state and storage.
    pub fn into_parts(self) -> (SessionState, S) {
        (self.state, self.slots)
    }

    /// Apply an action and mirror the affected slots.
    pub fn apply(&mut self, action: Action) {
        let slot_sync = SlotSync::for_action(&action);

        self.state.apply(action);

        match slot_sync {
            SlotSync::CartItems => {
                let items = self.state.cart_items.clone();
                self.write_slot(Slot::CartItems, &items);
            }
            SlotSync::DeleteCartItems => self.slots.delete(Slot::CartItems),
            SlotSync::DeliveryInfo => {
                if let Some(info) = self.state.delivery_info.clone() {
                    self.write_slot(Slot::DeliveryInfo, &info);
                }
            }
            SlotSync::PaymentMethod => {
                if let Some(method) = self.state.payment_method {
                    self.write_slot(Slot::PaymentMethod, &method);
                }
            }
            SlotSync::Identity => {
                if let Some(identity) = self.state.identity.clone() {
                    self.write_slot(Slot::Identity, &identity);
                }
            }
            SlotSync::DeleteAll => {
                for slot in Slot::ALL {
                    self.slots.delete(slot);
                }
            }
        }
    }

    // Durable writes are fire-and-forget; a payload that fails to
    // serialize leaves the slot untouched rather than failing the action.
    fn write_slot<T: Serialize>(&mut self, slot: Slot, value: &T) {
        if let Ok(payload) = serde_json::to_string(value) {
            self.slots.write(slot, payload);
        }
    }
}

fn read_slot<T: DeserializeOwned>(slots: &impl SlotStorage, slot: Slot) -> Option<T> {
    slots
        .read(slot)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

enum SlotSync {
    CartItems,
    DeleteCartItems,
    DeliveryInfo,
    PaymentMethod,
    Identity,
    DeleteAll,
}

impl SlotSync {
    fn for_action(action: &Action) -> Self {
        match action {
            Action::AddItem(_) | Action::RemoveItem(_) => Self::CartItems,
            Action::ClearItems => Self::DeleteCartItems,
            Action::SaveDeliveryInfo(_) => Self::DeliveryInfo,
            Action::SavePaymentMethod(_) => Self::PaymentMethod,
            Action::Login(_) => Self::Identity,
            Action::Logout => Self::DeleteAll,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    fn line(product: Uuid, quantity: u32) -> LineItem {
        LineItem {
            product,
            slug: "widget".to_string(),
            name: "Widget".to_string(),
            image: "/images/widget.jpg".to_string(),
            price: Decimal::new(2500, 2),
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
    fn mutations_round_trip_through_storage() {
        let mut store = SessionStore::restore(MemorySlots::default());
        store.apply(Action::AddItem(line(Uuid::now_v7(), 2)));
        store.apply(Action::SaveDeliveryInfo(delivery_info()));
        store.apply(Action::SavePaymentMethod(PaymentMethod::PayPal));
        store.apply(Action::Login(identity()));

        let (state, slots) = store.into_parts();
        let restored = SessionStore::restore(slots);

        assert_eq!(restored.state(), &state);
    }

    #[test]
    fn malformed_slots_restore_to_empty_defaults() {
        let mut slots = MemorySlots::default();
        slots.write(Slot::CartItems, "{not json".to_string());
        slots.write(Slot::DeliveryInfo, "[]".to_string());
        slots.write(Slot::PaymentMethod, "\"Cheque\"".to_string());
        slots.write(Slot::Identity, String::new());

        let store = SessionStore::restore(slots);

        assert_eq!(store.state(), &SessionState::default());
    }

    #[test]
    fn clearing_the_cart_deletes_the_cart_slot() {
        let mut store = SessionStore::restore(MemorySlots::default());
        store.apply(Action::AddItem(line(Uuid::now_v7(), 1)));
        assert!(store.slots().read(Slot::CartItems).is_some());

        store.apply(Action::ClearItems);

        assert!(
            store.slots().read(Slot::CartItems).is_none(),
            "clear-items must delete the cart slot, not only memory"
        );
    }

    #[test]
    fn logout_deletes_every_slot() {
        let mut store = SessionStore::restore(MemorySlots::default());
        store.apply(Action::AddItem(line(Uuid::now_v7(), 1)));
        store.apply(Action::SaveDeliveryInfo(delivery_info()));
        store.apply(Action::SavePaymentMethod(PaymentMethod::Stripe));
        store.apply(Action::Login(identity()));

        store.apply(Action::Logout);

        for slot in Slot::ALL {
            assert!(
                store.slots().read(slot).is_none(),
                "slot {slot:?} must be deleted on logout"
            );
        }
        assert_eq!(store.state(), &SessionState::default());
    }

    #[test]
    fn removing_a_line_rewrites_the_cart_slot() {
        let kept = Uuid::now_v7();
        let removed = Uuid::now_v7();
        let mut store = SessionStore::restore(MemorySlots::default());
        store.apply(Action::AddItem(line(kept, 1)));
        store.apply(Action::AddItem(line(removed, 4)));

        store.apply(Action::RemoveItem(removed));

        let (_, slots) = store.into_parts();
        let restored = SessionStore::restore(slots);
        assert_eq!(restored.state().cart_items.len(), 1);
        let remaining = restored
            .state()
            .cart_items
            .first()
            .expect("one line must remain");
        assert_eq!(remaining.product, kept);
    }
}
