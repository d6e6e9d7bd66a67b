//! Stock Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront::items::StockStatus;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Stock Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockResponse {
    /// Units currently in stock
    pub stock: u32,
}

impl From<StockStatus> for StockResponse {
    fn from(status: StockStatus) -> Self {
        Self {
            stock: status.stock,
        }
    }
}

/// Stock Status Handler
///
/// Checkout clients call this before every cart add; a response below the
/// requested quantity aborts the add.
#[endpoint(tags("products"), summary = "Stock Status")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<StockResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_by_slug(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    let status = state
        .app
        .products
        .stock_status(product.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(status.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::products::MockProductsService;

    use crate::test_helpers::{make_product, service, state_with_products};

    use super::*;

    #[tokio::test]
    async fn test_stock_resolves_slug_then_reports_units() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_get_by_slug()
            .once()
            .withf(|slug| slug == "widget")
            .return_once(move |_| Ok(make_product(uuid)));

        products
            .expect_stock_status()
            .once()
            .withf(move |product| *product == uuid)
            .return_once(|_| Ok(StockStatus { stock: 3 }));

        let mut res = TestClient::get("http://example.com/products/widget/stock")
            .send(&service(
                state_with_products(products),
                Router::with_path("products/{slug}/stock").get(handler),
            ))
            .await;

        let body: StockResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.stock, 3);

        Ok(())
    }
}
