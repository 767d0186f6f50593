// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use checkout_core::gateway::{GatewayOrder, GatewayOrderRequest, PaymentGateway};
use checkout_core::memory::{InMemoryCatalog, InMemoryCouponStore};
use checkout_core::{CatalogProduct, CheckoutError, ContextData, Coupon, LineItem, PipelineControl, ShippingInfo};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::Level;

// --- Tracing (once per test binary) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---
pub const TEST_SECRET: &str = "test_secret_key";

pub fn product(id: &str, price: Decimal) -> CatalogProduct {
  CatalogProduct {
    id: id.to_string(),
    name: format!("Product {id}"),
    price,
  }
}

pub fn coupon(code: &str, amount: Decimal) -> Coupon {
  Coupon {
    code: code.to_string(),
    amount,
  }
}

pub fn shipping() -> ShippingInfo {
  ShippingInfo {
    address: "221B Baker Street".to_string(),
    city: "Pune".to_string(),
    state: "MH".to_string(),
    country: "India".to_string(),
    pin_code: "411001".to_string(),
  }
}

pub fn item(product_id: &str, quantity: i64) -> LineItem {
  LineItem::new(product_id, quantity)
}

pub fn catalog(products: Vec<CatalogProduct>) -> InMemoryCatalog {
  InMemoryCatalog::new(products)
}

pub fn coupons(list: Vec<Coupon>) -> InMemoryCouponStore {
  InMemoryCouponStore::new(list)
}

// --- Scripted gateway ---
#[derive(Debug, Clone)]
pub enum GatewayScript {
  /// Echo the request back as an order with this id.
  Accept(String),
  Fail(String),
  /// Answer with a different amount than requested.
  WrongAmount(String),
  Hang(Duration),
}

#[derive(Debug)]
pub struct ScriptedGateway {
  script: GatewayScript,
  pub requests: Mutex<Vec<GatewayOrderRequest>>,
}

impl ScriptedGateway {
  pub fn new(script: GatewayScript) -> Self {
    Self {
      script,
      requests: Mutex::new(Vec::new()),
    }
  }

  pub fn accepting(order_id: &str) -> Self {
    Self::new(GatewayScript::Accept(order_id.to_string()))
  }

  pub fn calls(&self) -> usize {
    self.requests.lock().len()
  }

  pub fn last_request(&self) -> Option<GatewayOrderRequest> {
    self.requests.lock().last().cloned()
  }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
  async fn create_order(&self, request: &GatewayOrderRequest) -> anyhow::Result<GatewayOrder> {
    self.requests.lock().push(request.clone());
    match &self.script {
      GatewayScript::Accept(id) => Ok(GatewayOrder {
        id: id.clone(),
        amount: request.amount,
        currency: request.currency.clone(),
        status: "created".to_string(),
        created_at: 1_700_000_000,
      }),
      GatewayScript::Fail(reason) => Err(anyhow::anyhow!("{reason}")),
      GatewayScript::WrongAmount(id) => Ok(GatewayOrder {
        id: id.clone(),
        amount: request.amount + 1,
        currency: request.currency.clone(),
        status: "created".to_string(),
        created_at: 1_700_000_000,
      }),
      GatewayScript::Hang(delay) => {
        tokio::time::sleep(*delay).await;
        Err(anyhow::anyhow!("gateway answered too late"))
      }
    }
  }
}

// --- Pipeline test context ---
#[derive(Clone, Debug, Default)]
pub struct StepLog {
  pub steps_executed: Vec<String>,
  pub counter: i32,
  pub stop_at: Option<String>,
}

pub type StepFuture = Pin<Box<dyn Future<Output = Result<PipelineControl, CheckoutError>> + Send>>;

/// Appends `step_name` to the log and stops if the context asks for it.
pub fn recording_handler(step_name: &'static str) -> impl Fn(ContextData<StepLog>) -> StepFuture + Send + Sync + 'static {
  move |ctx: ContextData<StepLog>| -> StepFuture {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.steps_executed.push(step_name.to_string());
      if guard.stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  }
}
