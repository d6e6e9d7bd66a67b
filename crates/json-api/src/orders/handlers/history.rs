//! Order History Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, orders::errors::into_status_error, orders::responses::OrderResponse,
    state::State,
};

/// Order History Handler
///
/// The signed-in user's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "Order History",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let orders = state
        .app
        .orders
        .order_history(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
