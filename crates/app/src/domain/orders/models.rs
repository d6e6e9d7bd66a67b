//! Order Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use storefront::{
    session::{DeliveryInfo, PaymentMethod},
    totals::OrderTotals,
};

/// Order Model
///
/// Created once at placement with a frozen item snapshot, then mutated
/// exactly twice more: payment capture and delivery confirmation. Amounts
/// are minor units (pence).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub items: Vec<OrderItem>,
    pub delivery_info: DeliveryInfo,
    pub payment_method: PaymentMethod,
    pub payment_result: Option<PaymentResult>,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub tax: u64,
    pub total: u64,
    pub paid: bool,
    pub paid_at: Option<Timestamp>,
    pub delivered: bool,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// One snapshot line on a persisted order, independent of later catalog
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub name: String,
    pub image: String,
    pub price: u64,
    pub quantity: u32,
}

/// Payment-capture payload recorded on the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    pub id: String,
    pub status: String,
    pub email: String,
}

/// Capture payload from the payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCapture {
    pub id: String,
    pub status: String,
    pub payer_email: String,
}

/// Order-placement payload, as assembled by the checkout client.
///
/// Prices arrive as decimals; the service recomputes `totals` from the
/// lines and rejects mismatches before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub delivery_info: DeliveryInfo,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
}

/// One line of an order-placement payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub name: String,
    pub image: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Back-office dashboard numbers, from one aggregate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesSummary {
    pub orders_count: u64,
    pub products_count: u64,
    pub users_count: u64,
    /// Sum of order totals, minor units.
    pub sales_total: u64,
}
