//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use uuid::Uuid;

use storefront::{
    session::{DeliveryInfo, PaymentMethod},
    totals::OrderTotals,
};

use crate::{
    auth::AuthenticatedUser,
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::{NewOrder, NewOrderItem, Order, OrderItem, PaymentCapture, SalesSummary},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        user: Uuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        let snapshot = OrderSnapshot::build(order)?;

        // One transaction for the order and all its lines: the whole
        // document is written or none of it.
        let mut tx = self.db.begin().await?;

        let mut created = self
            .repository
            .create_order(&mut tx, user, &snapshot)
            .await?;

        for item in &snapshot.items {
            self.repository
                .create_order_item(&mut tx, created.uuid, item)
                .await?;
        }

        tx.commit().await?;

        created.items = snapshot.items;

        Ok(created)
    }

    async fn get_order(
        &self,
        requester: &AuthenticatedUser,
        order: Uuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.repository.get_order(&mut tx, order).await?;

        // Owner or admin only; anyone else learns nothing, not even that
        // the order exists.
        let mut found = match found {
            Some(found) if found.user_uuid == requester.uuid || requester.admin => found,
            _ => return Err(OrdersServiceError::NotFound),
        };

        found.items = self.repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn capture_payment(
        &self,
        requester: &AuthenticatedUser,
        order: Uuid,
        capture: PaymentCapture,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.repository.get_order(&mut tx, order).await?;

        match found {
            Some(found) if found.user_uuid == requester.uuid || requester.admin => {}
            _ => return Err(OrdersServiceError::NotFound),
        }

        let mut paid = self
            .repository
            .mark_order_paid(&mut tx, order, &capture)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        paid.items = self.repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(paid)
    }

    async fn confirm_delivery(&self, order: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut delivered = self
            .repository
            .mark_order_delivered(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        delivered.items = self.repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(delivered)
    }

    async fn order_history(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders_by_user(&mut tx, user).await?;

        for order in &mut orders {
            order.items = self.repository.get_order_items(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders(&mut tx).await?;

        for order in &mut orders {
            order.items = self.repository.get_order_items(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn sales_summary(&self) -> Result<SalesSummary, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let summary = self.repository.sales_summary(&mut tx).await?;

        tx.commit().await?;

        Ok(summary)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate and persist an order for the authenticated user.
    ///
    /// The owning user comes from authentication, never from the payload,
    /// and the submitted totals must match a recomputation from the lines.
    async fn place_order(&self, user: Uuid, order: NewOrder)
    -> Result<Order, OrdersServiceError>;

    /// Retrieve an order; owner or admin only.
    async fn get_order(
        &self,
        requester: &AuthenticatedUser,
        order: Uuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Record a payment capture on an order; owner or admin only.
    async fn capture_payment(
        &self,
        requester: &AuthenticatedUser,
        order: Uuid,
        capture: PaymentCapture,
    ) -> Result<Order, OrdersServiceError>;

    /// Mark an order delivered. Admin-gated at the HTTP layer.
    async fn confirm_delivery(&self, order: Uuid) -> Result<Order, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn order_history(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Every order, newest first, for the back office.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Dashboard aggregate numbers.
    async fn sales_summary(&self) -> Result<SalesSummary, OrdersServiceError>;
}

/// A validated, minor-unit order ready to insert.
#[derive(Debug, Clone)]
pub(crate) struct OrderSnapshot {
    pub items: Vec<OrderItem>,
    pub delivery_info: DeliveryInfo,
    pub payment_method: PaymentMethod,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub tax: u64,
    pub total: u64,
}

impl OrderSnapshot {
    pub(crate) fn build(order: NewOrder) -> Result<Self, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        if order.items.iter().any(|item| item.quantity == 0) {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        let recomputed =
            OrderTotals::from_lines(order.items.iter().map(|item| (item.price, item.quantity)));

        if recomputed != order.totals {
            return Err(OrdersServiceError::TotalsMismatch);
        }

        let items = order
            .items
            .into_iter()
            .map(|item| {
                Ok(OrderItem {
                    name: item.name,
                    image: item.image,
                    price: minor_units(item.price)?,
                    quantity: item.quantity,
                })
            })
            .collect::<Result<Vec<_>, OrdersServiceError>>()?;

        Ok(Self {
            items,
            delivery_info: order.delivery_info,
            payment_method: order.payment_method,
            subtotal: minor_units(recomputed.subtotal)?,
            delivery_fee: minor_units(recomputed.delivery)?,
            tax: minor_units(recomputed.tax)?,
            total: minor_units(recomputed.total)?,
        })
    }
}

/// Convert a decimal amount to minor units, rejecting sub-penny residues.
fn minor_units(value: Decimal) -> Result<u64, OrdersServiceError> {
    let scaled = value * Decimal::ONE_HUNDRED;

    if !scaled.fract().is_zero() {
        return Err(OrdersServiceError::InvalidAmount);
    }

    scaled.to_u64().ok_or(OrdersServiceError::InvalidAmount)
}
