//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*, orders::errors::into_status_error, orders::responses::OrderResponse,
    state::State,
};

/// Get Order Handler
///
/// Returns an order to its owner or an administrator; everyone else sees
/// not-found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user, order.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{TEST_USER_UUID, authed_service, make_order, state_with_orders};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        authed_service(
            state_with_orders(orders),
            Router::with_path("orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_own_order_returns_200() -> TestResult {
        let uuid = Uuid::now_v7();
        let order = make_order(uuid, TEST_USER_UUID);

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |requester, o| requester.uuid == TEST_USER_UUID && *o == uuid)
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid);
        assert_eq!(body.user_uuid, TEST_USER_UUID);

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_order_returns_404() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
