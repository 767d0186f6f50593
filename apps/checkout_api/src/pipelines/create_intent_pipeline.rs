// apps/checkout_api/src/pipelines/create_intent_pipeline.rs

use crate::errors::AppError;
use crate::pipelines::contexts::CreateIntentCtxData;
use checkout_core::pipeline::SkipCondition;
use checkout_core::{
  price_cart, resolve_discount, ContextData, IntentRecord, Pipeline, PipelineControl, PipelineError, PipelineRegistry,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

pub fn register_create_intent_pipeline(registry: &PipelineRegistry<AppError>) -> Result<(), PipelineError> {
  let no_coupon: SkipCondition<CreateIntentCtxData> =
    Arc::new(|ctx: ContextData<CreateIntentCtxData>| !ctx.read().has_coupon());

  let mut p = Pipeline::<CreateIntentCtxData, AppError>::new(&[
    ("validate_request", false, None),
    ("resolve_coupon", false, Some(no_coupon)),
    ("price_cart", false, None),
    ("open_gateway_order", false, None),
    ("track_intent", true, None), // Bookkeeping only, never fails the request
  ]);

  // Step 1: Reject carts that cannot be priced or shipped before touching any store.
  p.on_root("validate_request", |ctx_data: ContextData<CreateIntentCtxData>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      if guard.items.is_empty() {
        return Err(AppError::Validation("items required".to_string()));
      }
      if !guard.shipping_info.as_ref().is_some_and(|s| s.is_complete()) {
        return Err(AppError::Validation("shipping info required".to_string()));
      }
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  })?;

  // Step 2: One coupon lookup per attempt.
  p.on_root("resolve_coupon", |ctx_data: ContextData<CreateIntentCtxData>| {
    Box::pin(async move {
      let (services, code) = {
        let guard = ctx_data.read();
        (guard.app_state.services.clone(), guard.coupon.clone())
      };
      let discount = resolve_discount(services.coupons.as_ref(), code.as_deref()).await?;
      ctx_data.write().discount = discount;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  })?;

  // Step 3: Unit prices come from the catalog, never from the request.
  p.on_root("price_cart", |ctx_data: ContextData<CreateIntentCtxData>| {
    Box::pin(async move {
      let (services, items, discount) = {
        let guard = ctx_data.read();
        (guard.app_state.services.clone(), guard.items.clone(), guard.discount)
      };
      let ids: Vec<String> = items
        .iter()
        .map(|i| i.product_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
      let products = services.catalog.find_products(&ids).await?;
      let breakdown = price_cart(&items, &products, discount)?;
      info!(
        subtotal = %breakdown.subtotal,
        tax = %breakdown.tax,
        shipping = %breakdown.shipping,
        discount = %breakdown.discount,
        total = breakdown.total,
        "Cart priced."
      );
      ctx_data.write().breakdown = Some(breakdown);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  })?;

  // Step 4: Open the gateway order. Nothing is persisted before this succeeds.
  p.on_root("open_gateway_order", |ctx_data: ContextData<CreateIntentCtxData>| {
    Box::pin(async move {
      let (services, breakdown, shipping, customer_name) = {
        let guard = ctx_data.read();
        (
          guard.app_state.services.clone(),
          guard.breakdown.clone(),
          guard.shipping_info.clone(),
          guard.customer_name.clone(),
        )
      };
      let (Some(breakdown), Some(shipping)) = (breakdown, shipping) else {
        return Err(AppError::Internal("cart was not priced before opening the gateway order".to_string()));
      };
      let intent = services
        .intents
        .create(&breakdown, customer_name.as_deref(), &shipping)
        .await?;
      ctx_data.write().intent = Some(intent);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  })?;

  // Step 5: Record the pending intent for reconciliation.
  p.on_root("track_intent", |ctx_data: ContextData<CreateIntentCtxData>| {
    Box::pin(async move {
      let (services, ttl, intent) = {
        let guard = ctx_data.read();
        (
          guard.app_state.services.clone(),
          guard.app_state.config.intent_ttl,
          guard.intent.clone(),
        )
      };
      let Some(intent) = intent else {
        warn!("No intent to track.");
        return Ok::<_, AppError>(PipelineControl::Continue);
      };
      let ttl = chrono::Duration::from_std(ttl).map_err(|e| AppError::Config(format!("Invalid INTENT_TTL_SECS: {e}")))?;
      services
        .ledger
        .record_pending(IntentRecord::pending(&intent, chrono::Utc::now(), ttl))
        .await?;
      Ok(PipelineControl::Continue)
    })
  })?;

  registry.register_pipeline(p);
  info!("Create-intent pipeline registered.");
  Ok(())
}
