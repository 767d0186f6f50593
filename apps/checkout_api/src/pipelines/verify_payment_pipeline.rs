// apps/checkout_api/src/pipelines/verify_payment_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::VerifyPaymentCtxData;
use checkout_core::signature::MISSING_FIELDS;
use checkout_core::{ContextData, OrderDetails, Pipeline, PipelineControl, PipelineError, PipelineRegistry};
use rust_decimal::Decimal;
use tracing::{info, warn};

pub fn register_verify_payment_pipeline(registry: &PipelineRegistry<AppError>) -> Result<(), PipelineError> {
  let mut p = Pipeline::<VerifyPaymentCtxData, AppError>::new(&[
    ("validate_request", false, None),
    ("verify_signature", false, None),
    ("persist_order", false, None),
    ("mark_intent_verified", true, None),
  ]);

  // Step 1: Assemble the order details. Every field is required except the discount.
  p.on_root("validate_request", |ctx_data: ContextData<VerifyPaymentCtxData>| {
    Box::pin(async move {
      let submitted = ctx_data.read().submitted.clone();
      let Some(total) = submitted.total else {
        return Err(AppError::Validation(MISSING_FIELDS.to_string()));
      };
      let details = OrderDetails {
        items: submitted.items.unwrap_or_default(),
        shipping_info: submitted.shipping_info,
        user_id: submitted.user_id,
        total,
        discount: submitted.discount.unwrap_or(Decimal::ZERO),
      };
      details.validate()?;
      ctx_data.write().details = Some(details);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  })?;

  // Step 2: The only gate between "a payment happened" and "we believe it did".
  p.on_root("verify_signature", |ctx_data: ContextData<VerifyPaymentCtxData>| {
    Box::pin(async move {
      let verified = {
        let guard = ctx_data.read();
        guard.app_state.services.verifier.verify(&guard.claim)?
      };
      ctx_data.write().verified = Some(verified);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  })?;

  // Step 3: Persist once per gateway payment id.
  p.on_root("persist_order", |ctx_data: ContextData<VerifyPaymentCtxData>| {
    Box::pin(async move {
      let (services, verified, details) = {
        let mut guard = ctx_data.write();
        (guard.app_state.services.clone(), guard.verified.take(), guard.details.take())
      };
      let (Some(verified), Some(details)) = (verified, details) else {
        return Err(AppError::Internal("persist_order reached without a verified payment".to_string()));
      };
      let outcome = services.persister.persist(verified, details).await?;
      ctx_data.write().outcome = Some(outcome);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  })?;

  // Step 4: Close the intent in the ledger. The persisted total is client
  // supplied, so a disagreement with the tracked amount is flagged for reconciliation.
  p.on_root("mark_intent_verified", |ctx_data: ContextData<VerifyPaymentCtxData>| {
    Box::pin(async move {
      let (services, order) = {
        let guard = ctx_data.read();
        let order = guard.outcome.as_ref().map(|o| o.order().clone());
        (guard.app_state.services.clone(), order)
      };
      let Some(order) = order else {
        return Ok::<_, AppError>(PipelineControl::Continue);
      };
      let gateway_order_id = order.payment_info.gateway_order_id.as_str();

      match services.ledger.find(gateway_order_id).await? {
        Some(record) if !record.covers_total(order.total) => {
          warn!(
            gateway_order_id,
            order_id = %order.id,
            intent_amount = record.amount,
            order_total = %order.total,
            "Verified order total differs from the tracked intent amount."
          );
        }
        Some(_) => {}
        None => {
          info!(gateway_order_id, "No tracked intent for verified payment.");
          return Ok(PipelineControl::Continue);
        }
      }
      services.ledger.mark_verified(gateway_order_id).await?;
      Ok(PipelineControl::Continue)
    })
  })?;

  registry.register_pipeline(p);
  info!("Verify-payment pipeline registered.");
  Ok(())
}
