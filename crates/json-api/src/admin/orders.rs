//! Admin Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, orders::errors::into_status_error, orders::responses::OrderResponse,
    state::State,
};

/// Admin Orders Handler
///
/// Every order, newest first.
#[endpoint(
    tags("admin"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
