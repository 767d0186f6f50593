// apps/checkout_api/src/models/product.rs

use checkout_core::CatalogProduct;
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: String,
  pub name: String,
  pub price: Decimal,
}

impl From<ProductRow> for CatalogProduct {
  fn from(row: ProductRow) -> Self {
    CatalogProduct {
      id: row.id,
      name: row.name,
      price: row.price,
    }
  }
}
