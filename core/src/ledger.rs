// core/src/ledger.rs

//! Tracks opened gateway orders so that an intent which never got verified
//! leaves a trace an operator can reconcile.
//!
//! Pending -> Verified, or Pending -> Expired once `expires_at` passes.
//! Ledger writes never gate checkout: the application runs them as optional
//! pipeline steps.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, CheckoutResult};
use crate::intent::PaymentIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentStatus {
  Pending,
  Verified,
  Expired,
}

impl IntentStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      IntentStatus::Pending => "pending",
      IntentStatus::Verified => "verified",
      IntentStatus::Expired => "expired",
    }
  }
}

impl std::str::FromStr for IntentStatus {
  type Err = CheckoutError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(IntentStatus::Pending),
      "verified" => Ok(IntentStatus::Verified),
      "expired" => Ok(IntentStatus::Expired),
      other => Err(CheckoutError::store(anyhow::anyhow!("unknown intent status '{other}'"))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRecord {
  pub gateway_order_id: String,
  pub amount: i64,
  pub currency: String,
  pub receipt: String,
  pub status: IntentStatus,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl IntentRecord {
  pub fn pending(intent: &PaymentIntent, now: DateTime<Utc>, ttl: Duration) -> Self {
    Self {
      gateway_order_id: intent.gateway_order_id.clone(),
      amount: intent.amount,
      currency: intent.currency.clone(),
      receipt: intent.receipt.clone(),
      status: IntentStatus::Pending,
      created_at: now,
      expires_at: now + ttl,
    }
  }

  /// True when `total` (whole currency units) is the amount this intent
  /// opened the gateway order for.
  pub fn covers_total(&self, total: Decimal) -> bool {
    total
      .checked_mul(Decimal::ONE_HUNDRED)
      .is_some_and(|minor| minor == Decimal::from(self.amount))
  }
}

#[async_trait]
pub trait IntentLedger: Send + Sync {
  async fn record_pending(&self, record: IntentRecord) -> CheckoutResult<()>;

  /// Marks the intent verified. Returns `false` when no intent with that id
  /// is known (e.g. it was opened before tracking existed).
  async fn mark_verified(&self, gateway_order_id: &str) -> CheckoutResult<bool>;

  /// Moves every `Pending` intent whose `expires_at` is before `now` to
  /// `Expired` and returns how many moved.
  async fn expire_stale(&self, now: DateTime<Utc>) -> CheckoutResult<u64>;

  async fn find(&self, gateway_order_id: &str) -> CheckoutResult<Option<IntentRecord>>;
}
