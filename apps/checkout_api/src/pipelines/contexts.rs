// apps/checkout_api/src/pipelines/contexts.rs

//! Data carried through each pipeline run. Handlers receive these wrapped in
//! `ContextData`.

use crate::state::AppState;
use checkout_core::{
  LineItem, OrderDetails, PaymentIntent, PersistOutcome, PriceBreakdown, ShippingInfo, VerificationClaim,
  VerifiedPayment,
};
use rust_decimal::Decimal;

pub struct CreateIntentCtxData {
  pub app_state: AppState,
  pub items: Vec<LineItem>,
  pub shipping_info: Option<ShippingInfo>,
  pub coupon: Option<String>,
  pub customer_name: Option<String>,

  // Filled in by the pipeline:
  pub discount: Decimal,
  pub breakdown: Option<PriceBreakdown>,
  pub intent: Option<PaymentIntent>,
}

impl CreateIntentCtxData {
  pub fn new(
    app_state: AppState,
    items: Vec<LineItem>,
    shipping_info: Option<ShippingInfo>,
    coupon: Option<String>,
    customer_name: Option<String>,
  ) -> Self {
    Self {
      app_state,
      items,
      shipping_info,
      coupon,
      customer_name,
      discount: Decimal::ZERO,
      breakdown: None,
      intent: None,
    }
  }

  pub fn has_coupon(&self) -> bool {
    self.coupon.as_deref().is_some_and(|c| !c.trim().is_empty())
  }
}

/// Order fields exactly as the client sent them; nothing is validated yet.
#[derive(Debug, Clone, Default)]
pub struct SubmittedOrder {
  pub items: Option<Vec<LineItem>>,
  pub shipping_info: Option<ShippingInfo>,
  pub user_id: Option<String>,
  pub total: Option<Decimal>,
  pub discount: Option<Decimal>,
}

pub struct VerifyPaymentCtxData {
  pub app_state: AppState,
  pub claim: VerificationClaim,
  pub submitted: SubmittedOrder,

  // Filled in by the pipeline:
  pub details: Option<OrderDetails>,
  pub verified: Option<VerifiedPayment>,
  pub outcome: Option<PersistOutcome>,
}

impl VerifyPaymentCtxData {
  pub fn new(app_state: AppState, claim: VerificationClaim, submitted: SubmittedOrder) -> Self {
    Self {
      app_state,
      claim,
      submitted,
      details: None,
      verified: None,
      outcome: None,
    }
  }
}
