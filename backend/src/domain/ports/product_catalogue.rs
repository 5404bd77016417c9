//! Driving port for browsing and stocking the product catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Product, ProductDraft};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogue: Send + Sync {
    /// All products ordered by id, including sold-out ones.
    async fn list_products(&self) -> Result<Vec<Product>, Error>;

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, Error>;
}
