//! Product Models

use jiff::Timestamp;
use uuid::Uuid;

/// Product Model
///
/// Prices are minor units (pence).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: Uuid,
    pub slug: String,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full-overwrite update payload, as submitted by the back-office edit
/// form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub slug: String,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
}
