// apps/checkout_api/src/state.rs

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::pipelines;
use checkout_core::{Catalog, CouponStore, IntentCreator, IntentLedger, OrderPersister, PipelineRegistry, SignatureVerifier};
use std::sync::Arc;

/// Collaborators the checkout pipelines call into. Built once at startup.
pub struct CheckoutServices {
  pub catalog: Arc<dyn Catalog>,
  pub coupons: Arc<dyn CouponStore>,
  pub intents: IntentCreator,
  pub verifier: SignatureVerifier,
  pub persister: OrderPersister,
  pub ledger: Arc<dyn IntentLedger>,
}

#[derive(Clone)]
pub struct AppState {
  pub registry: Arc<PipelineRegistry<AppError>>,
  pub services: Arc<CheckoutServices>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wires the state and registers every checkout pipeline against it.
  pub fn new(config: AppConfig, services: CheckoutServices) -> Result<Self> {
    let state = Self {
      registry: Arc::new(PipelineRegistry::new()),
      services: Arc::new(services),
      config: Arc::new(config),
    };
    pipelines::register_all_pipelines(&state.registry)?;
    Ok(state)
  }
}
