// apps/checkout_api/src/db/coupons.rs

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, Coupon, CouponStore};
use sqlx::PgPool;

use crate::models::CouponRow;

#[derive(Clone)]
pub struct PgCouponStore {
  pool: PgPool,
}

impl PgCouponStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CouponStore for PgCouponStore {
  async fn find_by_code(&self, code: &str) -> CheckoutResult<Option<Coupon>> {
    let row = sqlx::query_as::<_, CouponRow>("SELECT code, amount FROM coupons WHERE code = $1")
      .bind(code)
      .fetch_optional(&self.pool)
      .await
      .map_err(CheckoutError::store)?;
    Ok(row.map(Coupon::from))
  }
}
