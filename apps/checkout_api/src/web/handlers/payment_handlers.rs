// apps/checkout_api/src/web/handlers/payment_handlers.rs

use actix_web::{web, HttpResponse};
use checkout_core::{resolve_discount, ContextData, LineItem, PersistOutcome, PipelineResult, ShippingInfo, VerificationClaim};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::{CreateIntentCtxData, SubmittedOrder, VerifyPaymentCtxData};
use crate::state::AppState;
use crate::web::extractors::CallerIdentity;

pub const PAYMENT_VERIFIED: &str = "Payment verified and order placed";
pub const PAYMENT_ALREADY_VERIFIED: &str = "Payment already verified";

// --- Request DTOs ---

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
  #[serde(default)]
  pub items: Vec<LineItem>,
  pub shipping_info: Option<ShippingInfo>,
  pub coupon: Option<String>,
  pub customer_name: Option<String>,
}

/// Gateway identifiers keep the gateway's own snake_case names; the order
/// fields are camelCase like the rest of the API.
#[derive(Deserialize, Debug, Default)]
pub struct VerifyPaymentRequest {
  pub razorpay_order_id: Option<String>,
  pub razorpay_payment_id: Option<String>,
  pub razorpay_signature: Option<String>,
  pub items: Option<Vec<LineItem>>,
  #[serde(rename = "shippingInfo")]
  pub shipping_info: Option<ShippingInfo>,
  #[serde(rename = "userId")]
  pub user_id: Option<String>,
  pub total: Option<Decimal>,
  pub discount: Option<Decimal>,
}

#[derive(Deserialize, Debug)]
pub struct DiscountQuery {
  pub coupon: Option<String>,
}

// --- Handler Implementations ---

#[instrument(
  name = "handler::create_payment",
  skip(app_state, caller, req_payload),
  fields(items = req_payload.items.len(), has_coupon = req_payload.coupon.is_some())
)]
pub async fn create_payment_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  req_payload: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  info!(user_id = ?caller.user_id, "Payment intent requested.");

  let ctx_data = ContextData::new(CreateIntentCtxData::new(
    app_state.get_ref().clone(),
    payload.items,
    payload.shipping_info,
    payload.coupon,
    payload.customer_name,
  ));

  match app_state.registry.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {
      let guard = ctx_data.read();
      let intent = guard.intent.as_ref().ok_or_else(|| {
        warn!("Create-intent pipeline completed without an intent.");
        AppError::Internal("intent missing after pipeline completion".to_string())
      })?;
      Ok(HttpResponse::Created().json(json!({
        "success": true,
        "razorpayOrderId": intent.gateway_order_id,
        "amount": intent.amount,
        "currency": intent.currency,
      })))
    }
    PipelineResult::Stopped => {
      warn!("Create-intent pipeline was stopped by a handler.");
      Err(AppError::Internal("payment intent creation halted".to_string()))
    }
  }
}

#[instrument(
  name = "handler::verify_payment",
  skip(app_state, caller, req_payload),
  fields(gateway_order_id = ?req_payload.razorpay_order_id, gateway_payment_id = ?req_payload.razorpay_payment_id)
)]
pub async fn verify_payment_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  req_payload: web::Json<VerifyPaymentRequest>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();

  // Under the authenticated policy the header identity is the owner of the
  // order; a body userId may only repeat it.
  let user_id = match (caller.user_id, payload.user_id) {
    (Some(header_id), Some(body_id)) if header_id != body_id => {
      return Err(AppError::Validation("user mismatch".to_string()));
    }
    (Some(header_id), _) => Some(header_id),
    (None, body_id) => body_id,
  };

  let claim = VerificationClaim {
    gateway_order_id: payload.razorpay_order_id,
    gateway_payment_id: payload.razorpay_payment_id,
    signature: payload.razorpay_signature,
  };
  let submitted = SubmittedOrder {
    items: payload.items,
    shipping_info: payload.shipping_info,
    user_id,
    total: payload.total,
    discount: payload.discount,
  };
  let ctx_data = ContextData::new(VerifyPaymentCtxData::new(app_state.get_ref().clone(), claim, submitted));

  match app_state.registry.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {
      let guard = ctx_data.read();
      let outcome = guard.outcome.as_ref().ok_or_else(|| {
        warn!("Verify-payment pipeline completed without a persisted order.");
        AppError::Internal("order missing after pipeline completion".to_string())
      })?;
      let message = match outcome {
        PersistOutcome::Created(_) => PAYMENT_VERIFIED,
        PersistOutcome::AlreadyRecorded(_) => PAYMENT_ALREADY_VERIFIED,
      };
      Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": message,
        "orderId": outcome.order().id,
      })))
    }
    PipelineResult::Stopped => {
      warn!("Verify-payment pipeline was stopped by a handler.");
      Err(AppError::Internal("payment verification halted".to_string()))
    }
  }
}

/// Coupon preview for the cart page.
#[instrument(name = "handler::discount", skip(app_state))]
pub async fn discount_handler(
  app_state: web::Data<AppState>,
  query: web::Query<DiscountQuery>,
) -> Result<HttpResponse, AppError> {
  let Some(code) = query.into_inner().coupon.filter(|c| !c.trim().is_empty()) else {
    return Err(AppError::Validation("coupon required".to_string()));
  };
  let discount = resolve_discount(app_state.services.coupons.as_ref(), Some(code.as_str())).await?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "discount": discount })))
}
