// apps/checkout_api/src/db/intents.rs

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, IntentLedger, IntentRecord, IntentStatus};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::IntentRow;

#[derive(Clone)]
pub struct PgIntentLedger {
  pool: PgPool,
}

impl PgIntentLedger {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl IntentLedger for PgIntentLedger {
  async fn record_pending(&self, record: IntentRecord) -> CheckoutResult<()> {
    sqlx::query(
      "INSERT INTO payment_intents (gateway_order_id, amount, currency, receipt, status, created_at, expires_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7) \
       ON CONFLICT (gateway_order_id) DO NOTHING",
    )
    .bind(&record.gateway_order_id)
    .bind(record.amount)
    .bind(&record.currency)
    .bind(&record.receipt)
    .bind(record.status.as_str())
    .bind(record.created_at)
    .bind(record.expires_at)
    .execute(&self.pool)
    .await
    .map_err(CheckoutError::store)?;
    Ok(())
  }

  async fn mark_verified(&self, gateway_order_id: &str) -> CheckoutResult<bool> {
    let result = sqlx::query("UPDATE payment_intents SET status = $1 WHERE gateway_order_id = $2")
      .bind(IntentStatus::Verified.as_str())
      .bind(gateway_order_id)
      .execute(&self.pool)
      .await
      .map_err(CheckoutError::store)?;
    Ok(result.rows_affected() > 0)
  }

  async fn expire_stale(&self, now: DateTime<Utc>) -> CheckoutResult<u64> {
    let result = sqlx::query("UPDATE payment_intents SET status = $1 WHERE status = $2 AND expires_at < $3")
      .bind(IntentStatus::Expired.as_str())
      .bind(IntentStatus::Pending.as_str())
      .bind(now)
      .execute(&self.pool)
      .await
      .map_err(CheckoutError::store)?;
    Ok(result.rows_affected())
  }

  async fn find(&self, gateway_order_id: &str) -> CheckoutResult<Option<IntentRecord>> {
    let row = sqlx::query_as::<_, IntentRow>(
      "SELECT gateway_order_id, amount, currency, receipt, status, created_at, expires_at \
       FROM payment_intents WHERE gateway_order_id = $1",
    )
    .bind(gateway_order_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(CheckoutError::store)?;
    row.map(IntentRecord::try_from).transpose()
  }
}
