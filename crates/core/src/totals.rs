//! Order totals
//!
//! Subtotal, delivery fee, VAT, and grand total for a set of cart lines.
//! The arithmetic is pinned for numeric compatibility with the checkout
//! clients: amounts round half-up at two decimal places, the free-delivery
//! threshold is checked against the unrounded subtotal, and VAT is taken
//! from the rounded one.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::items::LineItem;

/// Orders whose raw subtotal exceeds this ship for free.
pub const FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Flat delivery fee below the free-delivery threshold: 9.99.
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// VAT rate applied to the rounded subtotal: 20%.
pub const VAT_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Round half-up at two decimal places.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The four order amounts, each rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line totals, rounded.
    pub subtotal: Decimal,

    /// Delivery fee, zero above the free-delivery threshold.
    pub delivery: Decimal,

    /// VAT on the rounded subtotal.
    pub tax: Decimal,

    /// Subtotal plus delivery plus VAT.
    pub total: Decimal,
}

impl OrderTotals {
    /// Compute totals for the given cart lines.
    #[must_use]
    pub fn compute(items: &[LineItem]) -> Self {
        Self::from_lines(items.iter().map(|item| (item.price, item.quantity)))
    }

    /// Compute totals from bare `(unit price, quantity)` pairs.
    ///
    /// The threshold check runs on the unrounded sum; VAT on the rounded
    /// subtotal. Changing either input breaks compatibility with recorded
    /// orders.
    #[must_use]
    pub fn from_lines(lines: impl Iterator<Item = (Decimal, u32)>) -> Self {
        let raw: Decimal = lines
            .map(|(price, quantity)| price * Decimal::from(quantity))
            .sum();

        let subtotal = round2(raw);
        let delivery = if raw > FREE_DELIVERY_THRESHOLD {
            Decimal::ZERO
        } else {
            DELIVERY_FEE
        };
        let tax = round2(subtotal * VAT_RATE);
        let total = round2(subtotal + delivery + tax);

        Self {
            subtotal,
            delivery,
            tax,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn line(price: Decimal, quantity: u32) -> LineItem {
        LineItem {
            product: Uuid::now_v7(),
            slug: "item".to_string(),
            name: "Item".to_string(),
            image: "/images/item.jpg".to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn worked_example_rounds_half_up() {
        // 20.00 x 2 + 5.005 x 1 = 45.005
        let items = [line(Decimal::new(2000, 2), 2), line(Decimal::new(5005, 3), 1)];
        let totals = OrderTotals::compute(&items);

        assert_eq!(totals.subtotal, Decimal::new(4501, 2));
        assert_eq!(totals.delivery, Decimal::new(999, 2));
        assert_eq!(totals.tax, Decimal::new(900, 2));
        assert_eq!(totals.total, Decimal::new(6400, 2));
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let at_threshold = OrderTotals::compute(&[line(Decimal::new(5000, 2), 1)]);
        let above_threshold = OrderTotals::compute(&[line(Decimal::new(5001, 2), 1)]);

        assert_eq!(at_threshold.delivery, DELIVERY_FEE);
        assert_eq!(above_threshold.delivery, Decimal::ZERO);
    }

    #[test]
    fn threshold_sees_the_unrounded_subtotal() {
        // 50.004 rounds to 50.00 but still clears the threshold raw.
        let totals = OrderTotals::compute(&[line(Decimal::new(50_004, 3), 1)]);

        assert_eq!(totals.subtotal, Decimal::new(5000, 2));
        assert_eq!(totals.delivery, Decimal::ZERO);
    }

    #[test]
    fn totals_are_order_independent() {
        let a = line(Decimal::new(1999, 2), 3);
        let b = line(Decimal::new(250, 2), 1);
        let c = line(Decimal::new(10_005, 3), 2);

        let forward = OrderTotals::compute(&[a.clone(), b.clone(), c.clone()]);
        let reverse = OrderTotals::compute(&[c, b, a]);

        assert_eq!(forward, reverse);
    }

    #[test]
    fn empty_cart_totals_to_the_delivery_fee() {
        let totals = OrderTotals::compute(&[]);

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.delivery, DELIVERY_FEE);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, DELIVERY_FEE);
    }
}
