// apps/checkout_api/src/db/mod.rs

//! PostgreSQL implementations of the checkout store traits.

use sqlx::PgPool;
use tracing::{error, info};

pub mod catalog;
pub mod coupons;
pub mod intents;
pub mod orders;

pub use catalog::PgCatalog;
pub use coupons::PgCouponStore;
pub use intents::PgIntentLedger;
pub use orders::PgOrderStore;

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
  info!("Running database migrations");
  sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
    error!(error = %e, "Database migration failed");
    e
  })?;
  info!("Database migrations completed");
  Ok(())
}
