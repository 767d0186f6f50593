// apps/checkout_api/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::payment_handlers;

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn banner_handler() -> HttpResponse {
  HttpResponse::Ok().content_type("text/plain; charset=utf-8").body("Checkout API is running")
}

/// Malformed JSON bodies answer in the same `{ success, message }` shape as
/// every other failure.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    AppError::Validation(format!("invalid request body: {err}")).into()
  })
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(banner_handler))
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/api/v1/payment")
        .route("/create", web::post().to(payment_handlers::create_payment_handler))
        .route("/verify", web::post().to(payment_handlers::verify_payment_handler))
        .route("/discount", web::get().to(payment_handlers::discount_handler)),
    );
}
