//! Cart line items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One product entry in the cart, priced at the moment it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product this line refers to.
    pub product: Uuid,

    /// Catalog slug, kept so the line can link back to the product page.
    pub slug: String,

    /// Product name at the time of adding.
    pub name: String,

    /// Product image at the time of adding.
    pub image: String,

    /// Unit price at the time of adding.
    pub price: Decimal,

    /// Requested quantity.
    pub quantity: u32,
}

impl LineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Check the requested quantity against a stock report.
    ///
    /// The session store never checks stock itself; callers consult the
    /// stock interface first and abort the add on a shortage.
    ///
    /// # Errors
    ///
    /// Returns [`StockShortage`] when fewer units are available than
    /// requested.
    pub fn ensure_in_stock(&self, status: StockStatus) -> Result<(), StockShortage> {
        if status.stock < self.quantity {
            return Err(StockShortage {
                requested: self.quantity,
                available: status.stock,
            });
        }

        Ok(())
    }
}

/// Stock report for a single product, as returned by the stock interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatus {
    /// Units currently in stock.
    pub stock: u32,
}

/// Requested quantity exceeds the units in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("only {available} in stock, {requested} requested")]
pub struct StockShortage {
    /// Quantity the shopper asked for.
    pub requested: u32,

    /// Quantity the stock report offered.
    pub available: u32,
}
