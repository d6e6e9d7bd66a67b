//! Sales Summary Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::SalesSummary;

use crate::{
    extensions::*, money::format_minor, orders::errors::into_status_error, state::State,
};

/// Sales Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummaryResponse {
    /// Number of orders placed
    pub orders_count: u64,

    /// Number of products in the catalog
    pub products_count: u64,

    /// Number of registered users
    pub users_count: u64,

    /// Sum of order totals, two-decimal string
    pub sales_total: String,
}

impl From<SalesSummary> for SummaryResponse {
    fn from(summary: SalesSummary) -> Self {
        Self {
            orders_count: summary.orders_count,
            products_count: summary.products_count,
            users_count: summary.users_count,
            sales_total: format_minor(summary.sales_total),
        }
    }
}

/// Sales Summary Handler
///
/// The dashboard numbers, from one aggregate query.
#[endpoint(
    tags("admin"),
    summary = "Sales Summary",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let summary = state
        .app
        .orders
        .sales_summary()
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
