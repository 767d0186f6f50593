// tests/common/mod.rs
#![allow(dead_code)]

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use checkout_api::web::{configure_app_routes, json_config};
use checkout_api::{AppConfig, AppState, AuthPolicy, CheckoutServices};
use checkout_core::memory::{InMemoryCatalog, InMemoryCouponStore, InMemoryIntentLedger, InMemoryOrderStore};
use checkout_core::{
  CatalogProduct, Coupon, GatewayOrder, GatewayOrderRequest, IntentCreator, OrderPersister, PaymentGateway,
  SignatureVerifier,
};
use parking_lot::Mutex;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_SECRET: &str = "test_secret_key";

pub struct ScriptedGateway {
  order_id: String,
  fail: bool,
  pub requests: Mutex<Vec<GatewayOrderRequest>>,
}

impl ScriptedGateway {
  pub fn accepting(order_id: &str) -> Self {
    Self {
      order_id: order_id.to_string(),
      fail: false,
      requests: Mutex::new(Vec::new()),
    }
  }

  pub fn failing() -> Self {
    Self {
      order_id: String::new(),
      fail: true,
      requests: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> usize {
    self.requests.lock().len()
  }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
  async fn create_order(&self, request: &GatewayOrderRequest) -> anyhow::Result<GatewayOrder> {
    self.requests.lock().push(request.clone());
    if self.fail {
      anyhow::bail!("BAD_REQUEST_ERROR: Authentication failed");
    }
    Ok(GatewayOrder {
      id: self.order_id.clone(),
      amount: request.amount,
      currency: request.currency.clone(),
      status: "created".to_string(),
      created_at: 1_700_000_000,
    })
  }
}

pub struct TestHarness {
  pub state: AppState,
  pub gateway: Arc<ScriptedGateway>,
  pub orders: Arc<InMemoryOrderStore>,
  pub ledger: Arc<InMemoryIntentLedger>,
}

pub fn test_config(policy: AuthPolicy) -> AppConfig {
  let vars: HashMap<&str, &str> = HashMap::from([
    ("DATABASE_URL", "postgres://unused/checkout"),
    ("RAZORPAY_KEY_ID", "rzp_test_key"),
    ("RAZORPAY_SECRET", TEST_SECRET),
    (
      "CHECKOUT_AUTH_POLICY",
      match policy {
        AuthPolicy::Guest => "guest",
        AuthPolicy::Authenticated => "authenticated",
      },
    ),
  ]);
  AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap()
}

pub fn harness_with(gateway: ScriptedGateway, policy: AuthPolicy) -> TestHarness {
  let config = test_config(policy);
  let gateway = Arc::new(gateway);
  let orders = Arc::new(InMemoryOrderStore::new());
  let ledger = Arc::new(InMemoryIntentLedger::new());

  let catalog = InMemoryCatalog::new([
    CatalogProduct {
      id: "p600".to_string(),
      name: "Desk Lamp".to_string(),
      price: dec!(600),
    },
    CatalogProduct {
      id: "p250".to_string(),
      name: "Notebook".to_string(),
      price: dec!(250),
    },
  ]);
  let coupons = InMemoryCouponStore::new([Coupon {
    code: "SAVE50".to_string(),
    amount: dec!(50),
  }]);

  let services = CheckoutServices {
    catalog: Arc::new(catalog),
    coupons: Arc::new(coupons),
    intents: IntentCreator::new(gateway.clone(), config.currency.clone(), Duration::from_secs(2)),
    verifier: SignatureVerifier::new(config.signing_secret.clone()).unwrap(),
    persister: OrderPersister::new(orders.clone()),
    ledger: ledger.clone(),
  };
  let state = AppState::new(config, services).unwrap();

  TestHarness {
    state,
    gateway,
    orders,
    ledger,
  }
}

pub fn harness() -> TestHarness {
  harness_with(ScriptedGateway::accepting("order_IluGWxBm9U8zJ8"), AuthPolicy::Guest)
}

pub fn sign(order_id: &str, payment_id: &str) -> String {
  SignatureVerifier::new(TEST_SECRET).unwrap().sign(order_id, payment_id)
}

/// Sends `req` through a fresh service over `state` and returns the status
/// with the JSON body (`Value::Null` for non-JSON bodies).
pub async fn send(state: &AppState, req: test::TestRequest) -> (StatusCode, Value) {
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(state.clone()))
      .app_data(json_config())
      .configure(configure_app_routes),
  )
  .await;
  let resp = test::call_service(&app, req.to_request()).await;
  let status = resp.status();
  let body = test::read_body(resp).await;
  (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}
