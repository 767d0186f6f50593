// tests/order_tests.rs
mod common;

use checkout_core::memory::InMemoryOrderStore;
use checkout_core::order::{PaymentStatus, PAYMENT_METHOD_ONLINE};
use checkout_core::signature::MISSING_FIELDS;
use checkout_core::{
  CheckoutError, OrderDetails, OrderPersister, OrderStatus, OrderStore, PersistOutcome, SignatureVerifier,
  VerificationClaim, VerifiedPayment,
};
use common::*;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn verified(order_id: &str, payment_id: &str) -> VerifiedPayment {
  let verifier = SignatureVerifier::new(TEST_SECRET).unwrap();
  let signature = verifier.sign(order_id, payment_id);
  verifier
    .verify(&VerificationClaim::new(order_id, payment_id, signature))
    .unwrap()
}

fn details() -> OrderDetails {
  OrderDetails {
    items: vec![item("p1", 2)],
    shipping_info: Some(shipping()),
    user_id: Some("user-1".to_string()),
    total: dec!(1416),
    discount: dec!(0),
  }
}

fn persister() -> (Arc<InMemoryOrderStore>, OrderPersister) {
  let store = Arc::new(InMemoryOrderStore::new());
  (store.clone(), OrderPersister::new(store))
}

#[tokio::test]
async fn verified_payment_creates_a_processing_order() {
  setup_tracing();
  let (store, persister) = persister();
  let outcome = persister.persist(verified("order_1", "pay_1"), details()).await.unwrap();

  assert!(outcome.is_created());
  let order = outcome.order();
  assert_eq!(order.payment_method, PAYMENT_METHOD_ONLINE);
  assert_eq!(order.status, OrderStatus::Processing);
  assert_eq!(order.payment_info.status, PaymentStatus::Paid);
  assert_eq!(order.payment_info.gateway_order_id, "order_1");
  assert_eq!(order.payment_info.gateway_payment_id, "pay_1");
  assert_eq!(order.total, dec!(1416));
  assert_eq!(order.user_id, "user-1");
  assert_eq!(store.len(), 1);

  let found = store.find_by_payment_id("pay_1").await.unwrap();
  assert_eq!(found.as_ref().map(|o| o.id), Some(order.id));
}

#[tokio::test]
async fn replayed_payment_returns_the_existing_order() {
  setup_tracing();
  let (store, persister) = persister();
  let first = persister.persist(verified("order_1", "pay_1"), details()).await.unwrap();
  let second = persister.persist(verified("order_1", "pay_1"), details()).await.unwrap();

  assert!(matches!(second, PersistOutcome::AlreadyRecorded(_)));
  assert_eq!(first.order().id, second.order().id);
  assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn concurrent_replays_record_one_order() {
  setup_tracing();
  let (store, persister) = persister();
  let persister = Arc::new(persister);

  let mut handles = Vec::new();
  for _ in 0..8 {
    let p = persister.clone();
    handles.push(tokio::spawn(async move {
      p.persist(verified("order_race", "pay_race"), details()).await
    }));
  }
  let mut created = 0;
  for handle in handles {
    if handle.await.unwrap().unwrap().is_created() {
      created += 1;
    }
  }

  assert_eq!(created, 1);
  assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn distinct_payments_create_distinct_orders() {
  setup_tracing();
  let (store, persister) = persister();
  persister.persist(verified("order_1", "pay_1"), details()).await.unwrap();
  persister.persist(verified("order_2", "pay_2"), details()).await.unwrap();
  assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn incomplete_details_are_rejected_without_writing() {
  setup_tracing();
  let (store, persister) = persister();

  let cases = [
    OrderDetails {
      items: vec![],
      ..details()
    },
    OrderDetails {
      shipping_info: None,
      ..details()
    },
    OrderDetails {
      user_id: None,
      ..details()
    },
  ];
  for case in cases {
    let err = persister.persist(verified("order_x", "pay_x"), case).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Validation(ref m) if m == MISSING_FIELDS));
  }

  let err = persister
    .persist(
      verified("order_x", "pay_x"),
      OrderDetails {
        items: vec![item("p1", 0)],
        ..details()
      },
    )
    .await
    .unwrap_err();
  assert!(matches!(err, CheckoutError::Validation(ref m) if m == "quantity must be positive"));

  assert!(store.is_empty());
}
