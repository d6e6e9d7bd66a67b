//! Product response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::Product;

use crate::money::format_minor;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Catalog slug
    pub slug: String,

    /// Product name
    pub name: String,

    /// Product image
    pub image: String,

    /// Brand
    pub brand: String,

    /// Category
    pub category: String,

    /// Description
    pub description: String,

    /// Unit price, two-decimal string
    pub price: String,

    /// Units in stock
    pub stock: u32,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid,
            slug: product.slug,
            name: product.name,
            image: product.image,
            brand: product.brand,
            category: product.category,
            description: product.description,
            price: format_minor(product.price),
            stock: product.stock,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
