//! Products service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use storefront::items::StockStatus;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{Product, ProductUpdate},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        product.ok_or(ProductsServiceError::NotFound)
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        product.ok_or(ProductsServiceError::NotFound)
    }

    async fn stock_status(&self, product: Uuid) -> Result<StockStatus, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let stock = self.repository.get_stock(&mut tx, product).await?;

        tx.commit().await?;

        stock
            .map(|stock| StockStatus { stock })
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        // The back office creates a placeholder row and edits it in place;
        // the generated slug only has to be unique.
        let slug = format!("product-{}", Uuid::now_v7().simple());
        let created = self.repository.create_product(&mut tx, &slug).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: Uuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// The whole catalog, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product by its catalog slug.
    async fn get_by_slug(&self, slug: &str) -> Result<Product, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError>;

    /// Units in stock for a product; consulted before every cart add.
    async fn stock_status(&self, product: Uuid) -> Result<StockStatus, ProductsServiceError>;

    /// Create a placeholder product for the back office to edit.
    async fn create_product(&self) -> Result<Product, ProductsServiceError>;

    /// Overwrite a product with the given update.
    async fn update_product(
        &self,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Delete a product.
    async fn delete_product(&self, product: Uuid) -> Result<(), ProductsServiceError>;
}
