// tests/registry_tests.rs
mod common;

use checkout_core::{CheckoutError, ContextData, Pipeline, PipelineControl, PipelineError, PipelineRegistry, PipelineResult};
use common::*;

#[derive(Clone, Debug, Default)]
struct PricingCtx {
  total: i64,
}

#[derive(Clone, Debug, Default)]
struct VerifyCtx {
  verified: bool,
}

#[tokio::test]
async fn runs_the_pipeline_registered_for_the_context_type() {
  setup_tracing();
  let registry = PipelineRegistry::<CheckoutError>::new();

  let mut pricing = Pipeline::<PricingCtx, CheckoutError>::new(&[("price", false, None)]);
  pricing
    .on_root("price", |ctx: ContextData<PricingCtx>| async move {
      ctx.write().total = 1416;
      Ok::<_, CheckoutError>(PipelineControl::Continue)
    })
    .unwrap();
  registry.register_pipeline(pricing);

  let mut verify = Pipeline::<VerifyCtx, CheckoutError>::new(&[("verify", false, None)]);
  verify
    .on_root("verify", |ctx: ContextData<VerifyCtx>| async move {
      ctx.write().verified = true;
      Ok::<_, CheckoutError>(PipelineControl::Continue)
    })
    .unwrap();
  registry.register_pipeline(verify);

  assert!(registry.is_registered::<PricingCtx>());
  assert!(registry.is_registered::<VerifyCtx>());

  let pricing_ctx = ContextData::new(PricingCtx::default());
  assert_eq!(registry.run(pricing_ctx.clone()).await.unwrap(), PipelineResult::Completed);
  assert_eq!(pricing_ctx.read().total, 1416);

  let verify_ctx = ContextData::new(VerifyCtx::default());
  assert_eq!(registry.run(verify_ctx.clone()).await.unwrap(), PipelineResult::Completed);
  assert!(verify_ctx.read().verified);
}

#[tokio::test]
async fn unregistered_context_type_is_an_error() {
  setup_tracing();
  let registry = PipelineRegistry::<CheckoutError>::new();

  #[derive(Default)]
  struct Unregistered;

  let err = registry.run(ContextData::new(Unregistered)).await.unwrap_err();
  match err {
    CheckoutError::Pipeline(PipelineError::NotRegistered { type_name }) => assert!(type_name.contains("Unregistered")),
    other => panic!("expected NotRegistered, got {other:?}"),
  }
}

#[tokio::test]
async fn handler_errors_pass_through_the_registry() {
  setup_tracing();
  let registry = PipelineRegistry::<CheckoutError>::new();
  let mut pipeline = Pipeline::<VerifyCtx, CheckoutError>::new(&[("verify", false, None)]);
  pipeline
    .on_root("verify", |_ctx: ContextData<VerifyCtx>| async move {
      Err::<PipelineControl, _>(CheckoutError::Authentication("signature mismatch".to_string()))
    })
    .unwrap();
  registry.register_pipeline(pipeline);

  let err = registry.run(ContextData::new(VerifyCtx::default())).await.unwrap_err();
  assert!(matches!(err, CheckoutError::Authentication(ref m) if m == "signature mismatch"));
}
