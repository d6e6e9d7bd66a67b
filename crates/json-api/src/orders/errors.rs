//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyOrder => StatusError::bad_request().brief("Order has no items."),
        OrdersServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Order item quantity must be positive.")
        }
        OrdersServiceError::TotalsMismatch => StatusError::unprocessable_entity()
            .brief("Submitted totals do not match the priced items."),
        OrdersServiceError::InvalidAmount => {
            StatusError::unprocessable_entity().brief("Amounts must have at most two decimals.")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found."),
        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
