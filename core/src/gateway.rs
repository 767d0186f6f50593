// core/src/gateway.rs

//! The payment gateway as seen from checkout: it opens orders and nothing else.
//! Authenticity of completed payments is checked locally, see [`crate::signature`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayOrderRequest {
  /// Minor currency units.
  pub amount: i64,
  pub currency: String,
  pub receipt: String,
  pub notes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
  pub id: String,
  pub amount: i64,
  pub currency: String,
  #[serde(default)]
  pub status: String,
  #[serde(default)]
  pub created_at: i64,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
  /// Opens a gateway order. Implementations do not retry; any transport,
  /// credential or rate-limit failure is returned as is.
  async fn create_order(&self, request: &GatewayOrderRequest) -> anyhow::Result<GatewayOrder>;
}
