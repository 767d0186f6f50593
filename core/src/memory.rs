// core/src/memory.rs

//! In-process implementations of the store traits.
//!
//! They honour the same contracts as the PostgreSQL adapters, including the
//! one-order-per-payment-id constraint, so tests and local runs exercise the
//! real checkout semantics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::coupon::CouponStore;
use crate::error::CheckoutResult;
use crate::ledger::{IntentLedger, IntentRecord, IntentStatus};
use crate::model::{CatalogProduct, Coupon};
use crate::order::{NewOrder, Order, OrderStore, PersistOutcome};

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
  products: RwLock<HashMap<String, CatalogProduct>>,
}

impl InMemoryCatalog {
  pub fn new(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
    Self {
      products: RwLock::new(products.into_iter().map(|p| (p.id.clone(), p)).collect()),
    }
  }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
  async fn find_products(&self, ids: &[String]) -> CheckoutResult<Vec<CatalogProduct>> {
    let products = self.products.read();
    Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
  }
}

#[derive(Debug, Default)]
pub struct InMemoryCouponStore {
  coupons: RwLock<HashMap<String, Coupon>>,
}

impl InMemoryCouponStore {
  pub fn new(coupons: impl IntoIterator<Item = Coupon>) -> Self {
    Self {
      coupons: RwLock::new(coupons.into_iter().map(|c| (c.code.clone(), c)).collect()),
    }
  }

  pub fn remove(&self, code: &str) -> Option<Coupon> {
    self.coupons.write().remove(code)
  }
}

#[async_trait]
impl CouponStore for InMemoryCouponStore {
  async fn find_by_code(&self, code: &str) -> CheckoutResult<Option<Coupon>> {
    Ok(self.coupons.read().get(code).cloned())
  }
}

/// Orders keyed by gateway payment id, which doubles as the uniqueness
/// constraint.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
  orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.orders.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.orders.read().is_empty()
  }

  pub fn all(&self) -> Vec<Order> {
    self.orders.read().values().cloned().collect()
  }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
  async fn insert_paid(&self, order: NewOrder) -> CheckoutResult<PersistOutcome> {
    let mut orders = self.orders.write();
    let key = order.payment_info.gateway_payment_id.clone();
    if let Some(existing) = orders.get(&key) {
      return Ok(PersistOutcome::AlreadyRecorded(existing.clone()));
    }
    let stored = Order::from_new(order, Utc::now());
    orders.insert(key, stored.clone());
    Ok(PersistOutcome::Created(stored))
  }

  async fn find_by_payment_id(&self, gateway_payment_id: &str) -> CheckoutResult<Option<Order>> {
    Ok(self.orders.read().get(gateway_payment_id).cloned())
  }
}

#[derive(Debug, Default)]
pub struct InMemoryIntentLedger {
  intents: RwLock<HashMap<String, IntentRecord>>,
}

impl InMemoryIntentLedger {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl IntentLedger for InMemoryIntentLedger {
  async fn record_pending(&self, record: IntentRecord) -> CheckoutResult<()> {
    self.intents.write().insert(record.gateway_order_id.clone(), record);
    Ok(())
  }

  async fn mark_verified(&self, gateway_order_id: &str) -> CheckoutResult<bool> {
    match self.intents.write().get_mut(gateway_order_id) {
      Some(record) => {
        record.status = IntentStatus::Verified;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn expire_stale(&self, now: DateTime<Utc>) -> CheckoutResult<u64> {
    let mut expired = 0;
    for record in self.intents.write().values_mut() {
      if record.status == IntentStatus::Pending && record.expires_at < now {
        record.status = IntentStatus::Expired;
        expired += 1;
      }
    }
    Ok(expired)
  }

  async fn find(&self, gateway_order_id: &str) -> CheckoutResult<Option<IntentRecord>> {
    Ok(self.intents.read().get(gateway_order_id).cloned())
  }
}
