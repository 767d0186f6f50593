// apps/checkout_api/src/pipelines/mod.rs

//! The checkout workflows, expressed as pipelines over `checkout_core::pipeline`.

use crate::errors::AppError;
use checkout_core::{PipelineError, PipelineRegistry};

pub mod contexts;
pub mod create_intent_pipeline;
pub mod verify_payment_pipeline;

/// Registers every pipeline the HTTP handlers run. Called once at startup;
/// a wiring mistake fails startup instead of the first request.
pub fn register_all_pipelines(registry: &PipelineRegistry<AppError>) -> Result<(), PipelineError> {
  tracing::info!("Registering checkout pipelines...");
  create_intent_pipeline::register_create_intent_pipeline(registry)?;
  verify_payment_pipeline::register_verify_payment_pipeline(registry)?;
  tracing::info!("All checkout pipelines registered.");
  Ok(())
}
