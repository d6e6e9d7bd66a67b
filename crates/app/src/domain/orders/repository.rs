//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use storefront::session::{DeliveryInfo, PaymentMethod};

use crate::domain::orders::{
    models::{Order, OrderItem, PaymentCapture, PaymentResult, SalesSummary},
    service::OrderSnapshot,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const LIST_ORDERS_BY_USER_SQL: &str = include_str!("sql/list_orders_by_user.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const MARK_ORDER_PAID_SQL: &str = include_str!("sql/mark_order_paid.sql");
const MARK_ORDER_DELIVERED_SQL: &str = include_str!("sql/mark_order_delivered.sql");
const SALES_SUMMARY_SQL: &str = include_str!("sql/sales_summary.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
        snapshot: &OrderSnapshot,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(Uuid::now_v7())
            .bind(user)
            .bind(&snapshot.delivery_info.full_name)
            .bind(&snapshot.delivery_info.address)
            .bind(&snapshot.delivery_info.city)
            .bind(&snapshot.delivery_info.postcode)
            .bind(&snapshot.delivery_info.country)
            .bind(snapshot.payment_method.to_string())
            .bind(try_bind_amount(snapshot.subtotal)?)
            .bind(try_bind_amount(snapshot.delivery_fee)?)
            .bind(try_bind_amount(snapshot.tax)?)
            .bind(try_bind_amount(snapshot.total)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        item: &OrderItem,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CREATE_ORDER_ITEM_SQL)
            .bind(Uuid::now_v7())
            .bind(order)
            .bind(&item.name)
            .bind(&item.image)
            .bind(try_bind_amount(item.price)?)
            .bind(i64::from(item.quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_BY_USER_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn mark_order_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        capture: &PaymentCapture,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_ORDER_PAID_SQL)
            .bind(order)
            .bind(&capture.id)
            .bind(&capture.status)
            .bind(&capture.payer_email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_order_delivered(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_ORDER_DELIVERED_SQL)
            .bind(order)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn sales_summary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<SalesSummary, sqlx::Error> {
        query_as::<Postgres, SalesSummary>(SALES_SUMMARY_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_result = row
            .try_get::<Option<String>, _>("payment_id")?
            .map(|id| -> sqlx::Result<PaymentResult> {
                Ok(PaymentResult {
                    id,
                    status: row.try_get("payment_status")?,
                    email: row.try_get("payer_email")?,
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            items: Vec::new(),
            delivery_info: DeliveryInfo {
                full_name: row.try_get("full_name")?,
                address: row.try_get("address")?,
                city: row.try_get("city")?,
                postcode: row.try_get("postcode")?,
                country: row.try_get("country")?,
            },
            payment_method: parse_payment_method(row.try_get("payment_method")?)?,
            payment_result,
            subtotal: try_get_amount(row, "subtotal")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            tax: try_get_amount(row, "tax")?,
            total: try_get_amount(row, "total")?,
            paid: row.try_get("paid")?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            delivered: row.try_get("delivered")?,
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            name: row.try_get("name")?,
            image: row.try_get("image")?,
            price: try_get_amount(row, "price")?,
            quantity,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SalesSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            orders_count: try_get_amount(row, "orders_count")?,
            products_count: try_get_amount(row, "products_count")?,
            users_count: try_get_amount(row, "users_count")?,
            sales_total: try_get_amount(row, "sales_total")?,
        })
    }
}

fn parse_payment_method(raw: String) -> sqlx::Result<PaymentMethod> {
    match raw.as_str() {
        "PayPal" => Ok(PaymentMethod::PayPal),
        "Stripe" => Ok(PaymentMethod::Stripe),
        _ => Err(sqlx::Error::ColumnDecode {
            index: "payment_method".to_string(),
            source: format!("unknown payment method {raw:?}").into(),
        }),
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_bind_amount(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
