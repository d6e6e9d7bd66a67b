//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order has no items")]
    EmptyOrder,

    #[error("order item quantity must be positive")]
    InvalidQuantity,

    #[error("submitted totals do not match the priced items")]
    TotalsMismatch,

    #[error("amount is not representable in minor units")]
    InvalidAmount,

    #[error("order not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
