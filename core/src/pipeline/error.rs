// core/src/pipeline/error.rs

use thiserror::Error;

/// Faults of the runner itself, as opposed to failures raised by handlers.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("no pipeline registered for context type {type_name}")]
  NotRegistered { type_name: String },

  #[error("context type mismatch (expected {expected_type})")]
  TypeMismatch { expected_type: String },
}
