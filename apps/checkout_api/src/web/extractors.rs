// apps/checkout_api/src/web/extractors.rs

use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::config::AuthPolicy;
use crate::errors::AppError;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "X-User-ID";

/// The caller's identity as asserted by the upstream auth layer through the
/// `X-User-ID` header.
///
/// Under `AuthPolicy::Authenticated` a missing header rejects the request with
/// 401. Under `AuthPolicy::Guest` the identity is simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
  pub user_id: Option<String>,
}

impl FromRequest for CallerIdentity {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
      return ready(Err(AppError::Internal("application state not configured".to_string())));
    };

    let user_id = req
      .headers()
      .get(USER_ID_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(str::trim)
      .filter(|v| !v.is_empty())
      .map(str::to_string);

    if state.config.auth_policy == AuthPolicy::Authenticated && user_id.is_none() {
      warn!("CallerIdentity extractor: missing or invalid X-User-ID header.");
      return ready(Err(AppError::Unauthenticated("authentication required".to_string())));
    }
    ready(Ok(CallerIdentity { user_id }))
  }
}
