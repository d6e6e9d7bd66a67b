//! Payment Capture Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::PaymentCapture;

use crate::{
    extensions::*, orders::errors::into_status_error, orders::responses::OrderResponse,
    state::State,
};

/// Payment Capture Request
///
/// The capture payload handed back by the payment widget.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentCaptureRequest {
    pub id: String,
    pub status: String,
    pub payer_email: String,
}

impl From<PaymentCaptureRequest> for PaymentCapture {
    fn from(request: PaymentCaptureRequest) -> Self {
        PaymentCapture {
            id: request.id,
            status: request.status,
            payer_email: request.payer_email,
        }
    }
}

/// Paid Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaidOrderResponse {
    /// Outcome message
    pub message: String,

    /// The updated order
    pub order: OrderResponse,
}

/// Payment Capture Handler
///
/// Records the capture on the order: sets paid, the paid-at time, and the
/// payment result.
#[endpoint(
    tags("orders"),
    summary = "Capture Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order paid"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<PaymentCaptureRequest>,
    depot: &mut Depot,
) -> Result<Json<PaidOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .capture_payment(user, order.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PaidOrderResponse {
        message: "Order paid successfully.".to_string(),
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, models::PaymentResult};

    use crate::test_helpers::{TEST_USER_UUID, authed_service, make_order, state_with_orders};

    use super::*;

    #[tokio::test]
    async fn test_capture_marks_the_order_paid() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_capture_payment()
            .once()
            .withf(move |requester, o, capture| {
                requester.uuid == TEST_USER_UUID && *o == uuid && capture.id == "CAP-1"
            })
            .return_once(move |_, o, capture| {
                let mut order = make_order(o, TEST_USER_UUID);
                order.paid = true;
                order.paid_at = Some(Timestamp::UNIX_EPOCH);
                order.payment_result = Some(PaymentResult {
                    id: capture.id,
                    status: capture.status,
                    email: capture.payer_email,
                });

                Ok(order)
            });

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/pay"))
            .json(&json!({ "id": "CAP-1", "status": "COMPLETED", "payer_email": "ada@example.com" }))
            .send(&authed_service(
                state_with_orders(orders),
                Router::with_path("orders/{order}/pay").put(handler),
            ))
            .await;

        let body: PaidOrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Order paid successfully.");
        assert!(body.order.paid);
        let result = body.order.payment_result.expect("payment result expected");
        assert_eq!(result.id, "CAP-1");

        Ok(())
    }
}
