//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*, products::errors::into_status_error, products::responses::ProductResponse,
    state::State,
};

/// Get Product Handler
///
/// Returns a single product by its catalog slug.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_by_slug(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, service, state_with_products};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service(
            state_with_products(products),
            Router::with_path("products/{slug}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_by_slug_returns_200() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_get_by_slug()
            .once()
            .withf(|slug| slug == "widget")
            .return_once(move |_| Ok(make_product(uuid)));

        let mut res = TestClient::get("http://example.com/products/widget")
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid);
        assert_eq!(body.slug, "widget");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_slug_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_by_slug()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get("http://example.com/products/missing")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
