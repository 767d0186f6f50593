// core/src/coupon.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::error::{CheckoutError, CheckoutResult};
use crate::model::Coupon;

pub const INVALID_COUPON: &str = "Invalid Coupon Code";

/// Keyed coupon lookup. Coupons are managed elsewhere; this side only reads.
#[async_trait]
pub trait CouponStore: Send + Sync {
  async fn find_by_code(&self, code: &str) -> CheckoutResult<Option<Coupon>>;
}

/// Resolves the discount for an optional coupon code.
///
/// No code (or a blank one) means no discount. A code that the store does not
/// know fails the whole request; it is never treated as "no discount".
#[instrument(name = "coupon::resolve_discount", skip(store))]
pub async fn resolve_discount(store: &dyn CouponStore, code: Option<&str>) -> CheckoutResult<Decimal> {
  let Some(code) = code else {
    return Ok(Decimal::ZERO);
  };
  let code = code.trim();
  if code.is_empty() {
    return Ok(Decimal::ZERO);
  }

  match store.find_by_code(code).await? {
    Some(coupon) if coupon.amount >= Decimal::ZERO => {
      debug!(discount = %coupon.amount, "Coupon resolved.");
      Ok(coupon.amount)
    }
    Some(coupon) => {
      warn!(amount = %coupon.amount, "Coupon has a negative amount, refusing it.");
      Err(CheckoutError::validation(INVALID_COUPON))
    }
    None => Err(CheckoutError::validation(INVALID_COUPON)),
  }
}
