// apps/checkout_api/src/models/coupon.rs

use checkout_core::Coupon;
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CouponRow {
  pub code: String,
  pub amount: Decimal,
}

impl From<CouponRow> for Coupon {
  fn from(row: CouponRow) -> Self {
    Coupon {
      code: row.code,
      amount: row.amount,
    }
  }
}
