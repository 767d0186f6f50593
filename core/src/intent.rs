// core/src/intent.rs

//! Opens a gateway order for a priced cart.
//!
//! Nothing is persisted here. A failed or timed-out call surfaces as
//! `CheckoutError::Gateway` and is not retried; a fresh client request gets a
//! fresh receipt, which keeps gateway-side idempotency out of the picture.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::{GatewayOrderRequest, PaymentGateway};
use crate::model::ShippingInfo;
use crate::pricing::PriceBreakdown;

pub const ORDER_CREATION_FAILED: &str = "order creation failed";
pub const GUEST_CUSTOMER: &str = "Guest";

const RECEIPT_PREFIX: &str = "receipt_order_";
const RECEIPT_TOKEN_LEN: usize = 10;
/// Per-value limit the gateway applies to notes.
const MAX_NOTE_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
  pub gateway_order_id: String,
  /// Minor currency units.
  pub amount: i64,
  pub currency: String,
  pub receipt: String,
  pub notes: BTreeMap<String, String>,
}

pub struct IntentCreator {
  gateway: Arc<dyn PaymentGateway>,
  currency: String,
  timeout: Duration,
}

impl IntentCreator {
  pub fn new(gateway: Arc<dyn PaymentGateway>, currency: impl Into<String>, timeout: Duration) -> Self {
    Self {
      gateway,
      currency: currency.into(),
      timeout,
    }
  }

  pub fn currency(&self) -> &str {
    &self.currency
  }

  pub fn build_request(
    &self,
    breakdown: &PriceBreakdown,
    customer_name: Option<&str>,
    shipping: &ShippingInfo,
  ) -> CheckoutResult<GatewayOrderRequest> {
    if !shipping.is_complete() {
      return Err(CheckoutError::validation("shipping info required"));
    }

    let customer_name = customer_name
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .unwrap_or(GUEST_CUSTOMER);

    let mut notes = BTreeMap::new();
    notes.insert("customer_name".to_string(), truncate_note(customer_name));
    notes.insert("address".to_string(), truncate_note(&shipping.short_address()));

    Ok(GatewayOrderRequest {
      amount: breakdown.amount_in_minor_units(),
      currency: self.currency.clone(),
      receipt: new_receipt(),
      notes,
    })
  }

  #[instrument(name = "IntentCreator::create", skip_all, fields(total = breakdown.total))]
  pub async fn create(
    &self,
    breakdown: &PriceBreakdown,
    customer_name: Option<&str>,
    shipping: &ShippingInfo,
  ) -> CheckoutResult<PaymentIntent> {
    let request = self.build_request(breakdown, customer_name, shipping)?;

    let order = match tokio::time::timeout(self.timeout, self.gateway.create_order(&request)).await {
      Ok(Ok(order)) => order,
      Ok(Err(e)) => {
        error!(error = %e, receipt = %request.receipt, "Gateway order creation failed.");
        return Err(CheckoutError::Gateway(ORDER_CREATION_FAILED.to_string()));
      }
      Err(_) => {
        error!(timeout_ms = self.timeout.as_millis() as u64, receipt = %request.receipt, "Gateway order creation timed out.");
        return Err(CheckoutError::Gateway(ORDER_CREATION_FAILED.to_string()));
      }
    };

    if order.amount != request.amount || order.currency != request.currency {
      warn!(
        requested_amount = request.amount,
        gateway_amount = order.amount,
        gateway_currency = %order.currency,
        "Gateway order does not match the request."
      );
      return Err(CheckoutError::Gateway(ORDER_CREATION_FAILED.to_string()));
    }

    info!(gateway_order_id = %order.id, amount = order.amount, "Gateway order opened.");
    Ok(PaymentIntent {
      gateway_order_id: order.id,
      amount: order.amount,
      currency: order.currency,
      receipt: request.receipt,
      notes: request.notes,
    })
  }
}

/// `receipt_order_` followed by a random lowercase alphanumeric token.
pub fn new_receipt() -> String {
  let token: String = rand::thread_rng()
    .sample_iter(&Alphanumeric)
    .take(RECEIPT_TOKEN_LEN)
    .map(|b| char::from(b).to_ascii_lowercase())
    .collect();
  format!("{RECEIPT_PREFIX}{token}")
}

fn truncate_note(value: &str) -> String {
  value.chars().take(MAX_NOTE_LEN).collect()
}
