//! Checkout sequencer
//!
//! The checkout sequence (delivery address, payment method, order placement)
//! used to be enforced by each page re-checking its own preconditions. Here
//! it is one state machine: [`CheckoutStage::of`] names the first unmet
//! precondition, and [`CheckoutStep::guard`] turns that into the redirect a
//! step must perform before rendering. A precondition miss is a redirect,
//! never an error.

use crate::session::SessionState;

/// The checkout steps a shopper can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Capture the delivery address.
    Delivery,

    /// Select the payment provider.
    Payment,

    /// Review totals and place the order.
    PlaceOrder,
}

/// Where to send the shopper when a step's preconditions are unmet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Sign in first, then resume at the given step.
    Login {
        /// Step to return to after a successful login.
        resume: CheckoutStep,
    },

    /// Back to the delivery step.
    Delivery,

    /// Back to the payment step.
    Payment,

    /// An empty cart abandons checkout for the product listing.
    ProductListing,
}

/// The first unmet checkout precondition, inferred from session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// No signed-in shopper.
    NeedsAuth,

    /// No delivery address captured.
    NeedsDelivery,

    /// No payment provider selected.
    NeedsPayment,

    /// Nothing in the cart.
    NeedsNonEmptyCart,

    /// All preconditions hold; totals may be computed and the order placed.
    ReadyToPlace,
}

impl CheckoutStage {
    /// Infer the stage from session state. No object tracks "current
    /// state": the stage is re-derived from the session on every entry.
    #[must_use]
    pub fn of(state: &SessionState) -> Self {
        if state.identity.is_none() {
            return Self::NeedsAuth;
        }

        if state.delivery_info.is_none() {
            return Self::NeedsDelivery;
        }

        if state.payment_method.is_none() {
            return Self::NeedsPayment;
        }

        if state.cart_is_empty() {
            return Self::NeedsNonEmptyCart;
        }

        Self::ReadyToPlace
    }
}

impl CheckoutStep {
    /// The redirect this step must perform, or `None` when the shopper may
    /// stay.
    ///
    /// Every step requires a signed-in shopper; later steps additionally
    /// require the data captured by earlier ones.
    #[must_use]
    pub fn guard(self, state: &SessionState) -> Option<Redirect> {
        if state.identity.is_none() {
            return Some(Redirect::Login { resume: self });
        }

        match self {
            Self::Delivery => None,
            Self::Payment => state.delivery_info.is_none().then_some(Redirect::Delivery),
            Self::PlaceOrder => match CheckoutStage::of(state) {
                CheckoutStage::NeedsAuth => Some(Redirect::Login { resume: self }),
                CheckoutStage::NeedsDelivery => Some(Redirect::Delivery),
                CheckoutStage::NeedsPayment => Some(Redirect::Payment),
                CheckoutStage::NeedsNonEmptyCart => Some(Redirect::ProductListing),
                CheckoutStage::ReadyToPlace => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::{
        items::LineItem,
        session::{Action, DeliveryInfo, Identity, PaymentMethod},
    };

    use super::*;

    fn signed_in() -> SessionState {
        let mut state = SessionState::default();
        state.apply(Action::Login(Identity {
            user: Uuid::now_v7(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            admin: false,
            token: "sf_v1_test.token".to_string(),
        }));
        state
    }

    fn with_delivery(mut state: SessionState) -> SessionState {
        state.apply(Action::SaveDeliveryInfo(DeliveryInfo {
            full_name: "Ada Lovelace".to_string(),
            address: "1 Analytical Row".to_string(),
            city: "London".to_string(),
            postcode: "N1 9GU".to_string(),
            country: "United Kingdom".to_string(),
        }));
        state
    }

    fn with_cart(mut state: SessionState) -> SessionState {
        state.apply(Action::AddItem(LineItem {
            product: Uuid::now_v7(),
            slug: "widget".to_string(),
            name: "Widget".to_string(),
            image: "/images/widget.jpg".to_string(),
            price: Decimal::new(999, 2),
            quantity: 1,
        }));
        state
    }

    #[test]
    fn anonymous_payment_step_redirects_to_login_with_resume() {
        let state = SessionState::default();

        assert_eq!(
            CheckoutStep::Payment.guard(&state),
            Some(Redirect::Login {
                resume: CheckoutStep::Payment
            })
        );
    }

    #[test]
    fn missing_delivery_info_sends_place_order_back_to_delivery() {
        let state = signed_in();

        assert_eq!(
            CheckoutStep::PlaceOrder.guard(&state),
            Some(Redirect::Delivery)
        );
    }

    #[test]
    fn missing_payment_method_sends_place_order_back_to_payment() {
        let state = with_delivery(signed_in());

        assert_eq!(
            CheckoutStep::PlaceOrder.guard(&state),
            Some(Redirect::Payment)
        );
    }

    #[test]
    fn empty_cart_abandons_checkout_for_the_listing() {
        let mut state = with_delivery(signed_in());
        state.apply(Action::SavePaymentMethod(PaymentMethod::PayPal));

        assert_eq!(
            CheckoutStep::PlaceOrder.guard(&state),
            Some(Redirect::ProductListing)
        );
    }

    #[test]
    fn complete_session_is_ready_to_place() {
        let mut state = with_cart(with_delivery(signed_in()));
        state.apply(Action::SavePaymentMethod(PaymentMethod::PayPal));

        assert_eq!(CheckoutStage::of(&state), CheckoutStage::ReadyToPlace);
        assert_eq!(CheckoutStep::PlaceOrder.guard(&state), None);
    }

    #[test]
    fn delivery_step_only_needs_a_signed_in_shopper() {
        assert_eq!(CheckoutStep::Delivery.guard(&signed_in()), None);
    }

    #[test]
    fn stage_reports_the_first_unmet_precondition() {
        assert_eq!(
            CheckoutStage::of(&SessionState::default()),
            CheckoutStage::NeedsAuth
        );
        assert_eq!(CheckoutStage::of(&signed_in()), CheckoutStage::NeedsDelivery);
        assert_eq!(
            CheckoutStage::of(&with_delivery(signed_in())),
            CheckoutStage::NeedsPayment
        );
    }
}
