// apps/checkout_api/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use checkout_core::{CheckoutError, PipelineError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  /// Message authenticity failure (bad signature). Answered with 400: no
  /// session is involved.
  #[error("Authentication Failed: {0}")]
  Auth(String),

  /// Missing caller identity under the authenticated policy.
  #[error("Unauthenticated: {0}")]
  Unauthenticated(String),

  #[error("Payment Gateway Error: {0}")]
  Gateway(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Store Error: {0}")]
  Store(anyhow::Error),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: PipelineError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<CheckoutError> for AppError {
  fn from(err: CheckoutError) -> Self {
    match err {
      CheckoutError::Validation(m) => AppError::Validation(m),
      CheckoutError::Authentication(m) => AppError::Auth(m),
      CheckoutError::Gateway(m) => AppError::Gateway(m),
      CheckoutError::Configuration(m) => AppError::Config(m),
      CheckoutError::Store(source) => AppError::Store(source),
      CheckoutError::Pipeline(source) => AppError::Workflow { source },
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl AppError {
  /// Text safe to show a client. Server-side failures collapse to a fixed
  /// message; the detail goes to the log only.
  pub fn public_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::Unauthenticated(m) | AppError::Gateway(m) => m.clone(),
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Store(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        "Internal Server Error".to_string()
      }
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::Auth(_) => StatusCode::BAD_REQUEST,
      AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
      AppError::Gateway(_)
      | AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Store(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Rejecting request");
    }
    HttpResponse::build(status).json(json!({
      "success": false,
      "message": self.public_message(),
    }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
