// apps/checkout_api/src/db/catalog.rs

use async_trait::async_trait;
use checkout_core::{Catalog, CatalogProduct, CheckoutError, CheckoutResult};
use sqlx::PgPool;

use crate::models::ProductRow;

#[derive(Clone)]
pub struct PgCatalog {
  pool: PgPool,
}

impl PgCatalog {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl Catalog for PgCatalog {
  async fn find_products(&self, ids: &[String]) -> CheckoutResult<Vec<CatalogProduct>> {
    let rows = sqlx::query_as::<_, ProductRow>("SELECT id, name, price FROM products WHERE id = ANY($1)")
      .bind(ids)
      .fetch_all(&self.pool)
      .await
      .map_err(CheckoutError::store)?;
    Ok(rows.into_iter().map(CatalogProduct::from).collect())
  }
}
