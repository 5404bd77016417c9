//! PostgreSQL-backed product catalogue.
//!
//! Reads are plain selects; quantity is only ever decremented by the
//! redemption adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::ProductCatalogue;
use crate::domain::{Error, Product, ProductDraft};

use super::diesel_error_mapping::{map_domain_diesel_error, map_domain_pool_error};
use super::models::{NewProductRow, ProductRow};
use super::pool::DbPool;
use super::schema::products;

#[derive(Clone)]
pub struct DieselProductCatalogue {
    pool: DbPool,
}

impl DieselProductCatalogue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalogue for DieselProductCatalogue {
    async fn list_products(&self) -> Result<Vec<Product>, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_domain_diesel_error(err, "product"))?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let row: ProductRow = diesel::insert_into(products::table)
            .values(&NewProductRow {
                title: draft.title(),
                description: draft.description(),
                price: draft.price(),
                quantity: draft.quantity(),
                image: draft.image(),
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_domain_diesel_error(err, "product"))?;
        Ok(row.into())
    }
}
