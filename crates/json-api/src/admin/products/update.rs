//! Admin Product Update Handler

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

use storefront_app::domain::products::models::ProductUpdate;

use crate::{
    extensions::*,
    money::parse_minor,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// Product Update Request
///
/// The full edit form; every field overwrites the stored one.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductUpdateRequest {
    pub slug: String,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,

    /// Unit price, two-decimal string
    pub price: String,

    /// Units in stock
    pub stock: u32,
}

impl ProductUpdateRequest {
    fn into_update(self) -> Result<ProductUpdate, StatusError> {
        Ok(ProductUpdate {
            slug: self.slug,
            name: self.name,
            image: self.image,
            brand: self.brand,
            category: self.category,
            description: self.description,
            price: parse_minor(&self.price)?,
            stock: self.stock,
        })
    }
}

/// Admin Product Update Handler
#[endpoint(
    tags("admin"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::CONFLICT, description = "Slug already in use"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = json.into_inner().into_update()?;

    let updated = state
        .app
        .products
        .update_product(product.into_inner(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
