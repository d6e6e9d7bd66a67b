//! Admin Product Create Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*, products::errors::into_status_error, products::responses::ProductResponse,
    state::State,
};

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    /// Outcome message
    pub message: String,

    /// The placeholder product to edit
    pub product: ProductResponse,
}

/// Admin Product Create Handler
///
/// Creates a placeholder product with a generated slug; the back office
/// edits it in place afterwards.
#[endpoint(
    tags("admin"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .create_product()
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.slug), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse {
        message: "Product created successfully.".to_string(),
        product: product.into(),
    }))
}
