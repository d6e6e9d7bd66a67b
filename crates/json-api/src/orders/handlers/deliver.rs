//! Delivery Confirmation Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*, orders::errors::into_status_error, orders::responses::OrderResponse,
    state::State,
};

/// Delivered Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveredOrderResponse {
    /// Outcome message
    pub message: String,

    /// The updated order
    pub order: OrderResponse,
}

/// Delivery Confirmation Handler
///
/// Administrators mark an order delivered once it has shipped.
#[endpoint(
    tags("orders"),
    summary = "Confirm Delivery",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order marked delivered"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DeliveredOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .confirm_delivery(order.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeliveredOrderResponse {
        message: "Order status updated successfully.".to_string(),
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{TEST_USER_UUID, admin_service, make_order, state_with_orders};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        admin_service(
            state_with_orders(orders),
            Router::with_path("orders/{order}/deliver").put(handler),
        )
    }

    #[tokio::test]
    async fn test_deliver_marks_the_order_delivered() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_confirm_delivery()
            .once()
            .withf(move |o| *o == uuid)
            .return_once(move |o| {
                let mut order = make_order(o, TEST_USER_UUID);
                order.delivered = true;
                order.delivered_at = Some(Timestamp::UNIX_EPOCH);

                Ok(order)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/deliver"))
            .send(&make_service(orders))
            .await;

        let body: DeliveredOrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Order status updated successfully.");
        assert!(body.order.delivered);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_confirm_delivery()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/deliver"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
