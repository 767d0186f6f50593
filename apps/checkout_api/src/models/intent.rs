// apps/checkout_api/src/models/intent.rs

use checkout_core::{CheckoutError, IntentRecord, IntentStatus};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct IntentRow {
  pub gateway_order_id: String,
  pub amount: i64,
  pub currency: String,
  pub receipt: String,
  pub status: String,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl TryFrom<IntentRow> for IntentRecord {
  type Error = CheckoutError;

  fn try_from(row: IntentRow) -> Result<Self, Self::Error> {
    Ok(IntentRecord {
      status: row.status.parse::<IntentStatus>()?,
      gateway_order_id: row.gateway_order_id,
      amount: row.amount,
      currency: row.currency,
      receipt: row.receipt,
      created_at: row.created_at,
      expires_at: row.expires_at,
    })
  }
}
