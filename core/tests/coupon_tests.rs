// tests/coupon_tests.rs
mod common;

use checkout_core::coupon::INVALID_COUPON;
use checkout_core::{resolve_discount, CheckoutError};
use common::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn known_code_yields_its_amount() {
  setup_tracing();
  let store = coupons(vec![coupon("SAVE50", dec!(50))]);
  assert_eq!(resolve_discount(&store, Some("SAVE50")).await.unwrap(), dec!(50));
}

#[tokio::test]
async fn absent_or_blank_code_means_no_discount() {
  setup_tracing();
  let store = coupons(vec![coupon("SAVE50", dec!(50))]);
  assert_eq!(resolve_discount(&store, None).await.unwrap(), Decimal::ZERO);
  assert_eq!(resolve_discount(&store, Some("")).await.unwrap(), Decimal::ZERO);
}

#[tokio::test]
async fn unknown_code_is_invalid() {
  setup_tracing();
  let store = coupons(vec![coupon("SAVE50", dec!(50))]);
  let err = resolve_discount(&store, Some("NOPE")).await.unwrap_err();
  assert!(matches!(err, CheckoutError::Validation(ref m) if m == INVALID_COUPON));
}

#[tokio::test]
async fn codes_are_case_sensitive() {
  setup_tracing();
  let store = coupons(vec![coupon("SAVE50", dec!(50))]);
  assert!(resolve_discount(&store, Some("save50")).await.is_err());
}

#[tokio::test]
async fn removed_coupon_stops_resolving() {
  setup_tracing();
  let store = coupons(vec![coupon("ONCE", dec!(20))]);
  assert_eq!(resolve_discount(&store, Some("ONCE")).await.unwrap(), dec!(20));
  store.remove("ONCE");
  assert!(resolve_discount(&store, Some("ONCE")).await.is_err());
}

#[tokio::test]
async fn negative_amount_coupon_is_invalid() {
  setup_tracing();
  let store = coupons(vec![coupon("BROKEN", dec!(-10))]);
  let err = resolve_discount(&store, Some("BROKEN")).await.unwrap_err();
  assert!(matches!(err, CheckoutError::Validation(ref m) if m == INVALID_COUPON));
}
