// apps/checkout_api/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use checkout_api::config::{AppConfig, LogFormat};
use checkout_api::db::{self, PgCatalog, PgCouponStore, PgIntentLedger, PgOrderStore};
use checkout_api::services::{spawn_intent_sweeper, RazorpayGateway};
use checkout_api::state::{AppState, CheckoutServices};
use checkout_api::web::{configure_app_routes, json_config};
use checkout_core::{IntentCreator, IntentLedger, OrderPersister, SignatureVerifier};
use sqlx::PgPool;
use std::fmt::Display;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  match format {
    LogFormat::Json => tracing_subscriber::fmt()
      .json()
      .with_env_filter(filter)
      .with_span_events(FmtSpan::CLOSE)
      .init(),
    LogFormat::Text => tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_span_events(FmtSpan::CLOSE)
      .init(),
  }
}

/// Startup failures stop the process before the listener is bound.
fn fatal(context: &str, err: impl Display) -> ! {
  tracing::error!(error = %err, "{context}");
  std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let loaded = AppConfig::from_env();
  init_tracing(loaded.as_ref().map(|c| c.log_format).unwrap_or(LogFormat::Text));
  tracing::info!("Starting checkout API server...");

  let app_config = loaded.unwrap_or_else(|e| fatal("Failed to load application configuration.", e));
  tracing::debug!(config = ?app_config, "Configuration loaded.");

  let verifier = SignatureVerifier::new(app_config.signing_secret.clone())
    .unwrap_or_else(|e| fatal("Signing secret rejected.", e));

  let db_pool = PgPool::connect(&app_config.database_url)
    .await
    .unwrap_or_else(|e| fatal("Failed to connect to the database.", e));
  tracing::info!("Successfully connected to the database.");
  if let Err(e) = db::run_migrations(&db_pool).await {
    fatal("Failed to apply database migrations.", e);
  }

  let gateway = RazorpayGateway::new(
    app_config.razorpay_api_base.clone(),
    app_config.razorpay_key_id.clone(),
    app_config.razorpay_key_secret.clone(),
    app_config.gateway_timeout,
  )
  .unwrap_or_else(|e| fatal("Failed to build the gateway client.", e));

  let ledger: Arc<dyn IntentLedger> = Arc::new(PgIntentLedger::new(db_pool.clone()));
  let services = CheckoutServices {
    catalog: Arc::new(PgCatalog::new(db_pool.clone())),
    coupons: Arc::new(PgCouponStore::new(db_pool.clone())),
    intents: IntentCreator::new(Arc::new(gateway), app_config.currency.clone(), app_config.gateway_timeout),
    verifier,
    persister: OrderPersister::new(Arc::new(PgOrderStore::new(db_pool.clone()))),
    ledger: ledger.clone(),
  };

  let sweep_interval = app_config.intent_sweep_interval;
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  let app_state = AppState::new(app_config, services).unwrap_or_else(|e| fatal("Failed to register pipelines.", e));

  let _sweeper = spawn_intent_sweeper(ledger, sweep_interval);

  tracing::info!("Attempting to bind server to {}...", server_address);
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .app_data(json_config())
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
