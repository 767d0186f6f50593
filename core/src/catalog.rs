// core/src/catalog.rs

use async_trait::async_trait;

use crate::error::CheckoutResult;
use crate::model::CatalogProduct;

/// Read-only product lookup.
#[async_trait]
pub trait Catalog: Send + Sync {
  /// Returns the products matching `ids`. Unknown ids are simply absent from
  /// the result; order is unspecified.
  async fn find_products(&self, ids: &[String]) -> CheckoutResult<Vec<CatalogProduct>>;
}
