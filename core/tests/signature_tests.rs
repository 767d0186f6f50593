// tests/signature_tests.rs
mod common;

use checkout_core::signature::{MISSING_FIELDS, SIGNATURE_MISMATCH};
use checkout_core::{CheckoutError, SignatureVerifier, VerificationClaim};
use common::TEST_SECRET;

const ORDER_ID: &str = "order_IluGWxBm9U8zJ8";
const PAYMENT_ID: &str = "pay_IluH7ftZeAvrrZ";
// HMAC-SHA256(key = "test_secret_key", msg = "order_IluGWxBm9U8zJ8|pay_IluH7ftZeAvrrZ")
const KNOWN_SIGNATURE: &str = "69eb5d2c4fea5f97dc7475dcbbf695ac7e3eb90a14f1e49c27e72c86f444b172";

fn verifier() -> SignatureVerifier {
  SignatureVerifier::new(TEST_SECRET).unwrap()
}

fn is_mismatch(err: &CheckoutError) -> bool {
  matches!(err, CheckoutError::Authentication(m) if m == SIGNATURE_MISMATCH)
}

#[test]
fn signs_the_documented_message() {
  assert_eq!(verifier().sign(ORDER_ID, PAYMENT_ID), KNOWN_SIGNATURE);
}

#[test]
fn signing_is_deterministic() {
  let v = verifier();
  assert_eq!(v.sign("order_a", "pay_b"), v.sign("order_a", "pay_b"));
  assert_ne!(v.sign("order_a", "pay_b"), v.sign("order_b", "pay_a"));
}

#[test]
fn valid_signature_yields_verified_payment() {
  let payment = verifier()
    .verify(&VerificationClaim::new(ORDER_ID, PAYMENT_ID, KNOWN_SIGNATURE))
    .unwrap();
  assert_eq!(payment.gateway_order_id(), ORDER_ID);
  assert_eq!(payment.gateway_payment_id(), PAYMENT_ID);
  assert_eq!(payment.signature(), KNOWN_SIGNATURE);
}

#[test]
fn signature_from_another_secret_is_rejected() {
  let forged = SignatureVerifier::new("some_other_secret").unwrap().sign(ORDER_ID, PAYMENT_ID);
  let err = verifier()
    .verify(&VerificationClaim::new(ORDER_ID, PAYMENT_ID, forged))
    .unwrap_err();
  assert!(is_mismatch(&err));
}

#[test]
fn swapped_or_altered_ids_are_rejected() {
  let v = verifier();
  assert!(is_mismatch(
    &v.verify(&VerificationClaim::new(PAYMENT_ID, ORDER_ID, KNOWN_SIGNATURE)).unwrap_err()
  ));
  assert!(is_mismatch(
    &v.verify(&VerificationClaim::new("order_other", PAYMENT_ID, KNOWN_SIGNATURE))
      .unwrap_err()
  ));
}

#[test]
fn comparison_is_exact() {
  let v = verifier();
  let upper = KNOWN_SIGNATURE.to_uppercase();
  assert!(is_mismatch(&v.verify(&VerificationClaim::new(ORDER_ID, PAYMENT_ID, upper)).unwrap_err()));

  let padded = format!(" {KNOWN_SIGNATURE}");
  assert!(is_mismatch(&v.verify(&VerificationClaim::new(ORDER_ID, PAYMENT_ID, padded)).unwrap_err()));

  let truncated = &KNOWN_SIGNATURE[..40];
  assert!(is_mismatch(
    &v.verify(&VerificationClaim::new(ORDER_ID, PAYMENT_ID, truncated)).unwrap_err()
  ));
}

#[test]
fn missing_fields_are_a_validation_error() {
  let v = verifier();
  let claims = [
    VerificationClaim::default(),
    VerificationClaim {
      signature: None,
      ..VerificationClaim::new(ORDER_ID, PAYMENT_ID, KNOWN_SIGNATURE)
    },
    VerificationClaim::new(ORDER_ID, "", KNOWN_SIGNATURE),
    VerificationClaim::new("", PAYMENT_ID, KNOWN_SIGNATURE),
    VerificationClaim::new(ORDER_ID, PAYMENT_ID, ""),
  ];
  for claim in &claims {
    let err = v.verify(claim).unwrap_err();
    assert!(
      matches!(err, CheckoutError::Validation(ref m) if m == MISSING_FIELDS),
      "claim {claim:?} gave {err:?}"
    );
  }
}

#[test]
fn blank_secret_is_a_configuration_error() {
  assert!(matches!(SignatureVerifier::new(""), Err(CheckoutError::Configuration(_))));
  assert!(matches!(SignatureVerifier::new("   "), Err(CheckoutError::Configuration(_))));
}

#[test]
fn debug_output_hides_the_secret() {
  let rendered = format!("{:?}", verifier());
  assert!(!rendered.contains(TEST_SECRET));
}
