// apps/checkout_api/src/services/intent_sweeper.rs

//! Background task that moves overdue pending intents to `expired`.

use checkout_core::{CheckoutResult, IntentLedger};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub async fn sweep_once(ledger: &dyn IntentLedger) -> CheckoutResult<u64> {
  let expired = ledger.expire_stale(Utc::now()).await?;
  if expired > 0 {
    info!(expired, "Expired stale payment intents.");
  } else {
    debug!("No stale payment intents.");
  }
  Ok(expired)
}

/// Sweeps every `every` until the runtime shuts down. A failed sweep is
/// logged and retried on the next tick.
pub fn spawn_intent_sweeper(ledger: Arc<dyn IntentLedger>, every: Duration) -> JoinHandle<()> {
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
      ticker.tick().await;
      if let Err(e) = sweep_once(ledger.as_ref()).await {
        warn!(error = %e, "Intent sweep failed.");
      }
    }
  })
}
