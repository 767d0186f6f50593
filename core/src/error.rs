// core/src/error.rs

use thiserror::Error;

use crate::pipeline::PipelineError;

/// Failure taxonomy of the checkout core.
///
/// The message carried by `Validation`, `Authentication` and `Gateway` is
/// safe to show to a client. `Configuration` is a startup-class failure and
/// `Store` wraps an opaque collaborator error that must only be logged.
#[derive(Debug, Error)]
pub enum CheckoutError {
  #[error("{0}")]
  Validation(String),

  /// The claimed payment signature does not authenticate.
  #[error("{0}")]
  Authentication(String),

  /// The payment gateway failed or timed out.
  #[error("{0}")]
  Gateway(String),

  #[error("configuration error: {0}")]
  Configuration(String),

  #[error("store error: {0}")]
  Store(#[source] anyhow::Error),

  #[error("pipeline error: {0}")]
  Pipeline(#[from] PipelineError),
}

impl CheckoutError {
  pub fn validation(message: impl Into<String>) -> Self {
    CheckoutError::Validation(message.into())
  }

  pub fn store(err: impl Into<anyhow::Error>) -> Self {
    CheckoutError::Store(err.into())
  }
}

pub type CheckoutResult<T, E = CheckoutError> = std::result::Result<T, E>;
