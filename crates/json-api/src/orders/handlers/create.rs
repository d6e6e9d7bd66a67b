//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront::totals::OrderTotals;
use storefront_app::domain::orders::models::{NewOrder, NewOrderItem};

use crate::{
    extensions::*,
    money::parse_amount,
    orders::errors::into_status_error,
    orders::responses::{DeliveryInfoDto, OrderResponse, PaymentMethodDto},
    state::State,
};

/// Place Order Request
///
/// The assembled checkout session: item snapshot, delivery address, payment
/// provider, and the client-computed totals. The server recomputes the
/// totals and refuses mismatches.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub order_items: Vec<OrderItemRequest>,
    pub delivery_info: DeliveryInfoDto,
    pub payment_method: PaymentMethodDto,

    /// Subtotal, two-decimal string
    pub subtotal: String,

    /// Delivery fee, two-decimal string
    pub delivery: String,

    /// VAT, two-decimal string
    pub tax: String,

    /// Grand total, two-decimal string
    pub total: String,
}

/// One line of a place-order request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemRequest {
    pub name: String,
    pub image: String,

    /// Unit price, decimal string
    pub price: String,

    pub quantity: u32,
}

impl CreateOrderRequest {
    fn into_new_order(self) -> Result<NewOrder, StatusError> {
        let items = self
            .order_items
            .into_iter()
            .map(|item| {
                Ok(NewOrderItem {
                    name: item.name,
                    image: item.image,
                    price: parse_amount(&item.price)?,
                    quantity: item.quantity,
                })
            })
            .collect::<Result<Vec<_>, StatusError>>()?;

        Ok(NewOrder {
            items,
            delivery_info: self.delivery_info.into(),
            payment_method: self.payment_method.into(),
            totals: OrderTotals {
                subtotal: parse_amount(&self.subtotal)?,
                delivery: parse_amount(&self.delivery)?,
                tax: parse_amount(&self.tax)?,
                total: parse_amount(&self.total)?,
            },
        })
    }
}

/// Place Order Handler
///
/// Persists the order for the signed-in user. Ownership comes from the
/// bearer token, never from the payload.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Totals mismatch"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let new_order = json.into_inner().into_new_order()?;

    let order = state
        .app
        .orders
        .place_order(user.uuid, new_order)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
