// apps/checkout_api/src/services/razorpay.rs

//! Razorpay Orders API client.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use checkout_core::{GatewayOrder, GatewayOrderRequest, PaymentGateway};
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, instrument};

#[derive(Clone)]
pub struct RazorpayGateway {
  http_client: reqwest::Client,
  api_base: String,
  key_id: String,
  key_secret: String,
}

impl std::fmt::Debug for RazorpayGateway {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RazorpayGateway")
      .field("api_base", &self.api_base)
      .field("key_id", &self.key_id)
      .field("key_secret", &"[REDACTED]")
      .finish()
  }
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
  error: RazorpayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorDetail {
  #[serde(default)]
  code: String,
  #[serde(default)]
  description: String,
}

impl RazorpayGateway {
  pub fn new(
    api_base: impl Into<String>,
    key_id: impl Into<String>,
    key_secret: impl Into<String>,
    timeout: Duration,
  ) -> anyhow::Result<Self> {
    let http_client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .context("building Razorpay HTTP client")?;
    Ok(Self {
      http_client,
      api_base: api_base.into(),
      key_id: key_id.into(),
      key_secret: key_secret.into(),
    })
  }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
  #[instrument(name = "razorpay::create_order", skip_all, fields(amount = request.amount, receipt = %request.receipt))]
  async fn create_order(&self, request: &GatewayOrderRequest) -> anyhow::Result<GatewayOrder> {
    let url = format!("{}/orders", self.api_base);
    let response = self
      .http_client
      .post(&url)
      .basic_auth(&self.key_id, Some(&self.key_secret))
      .json(request)
      .send()
      .await
      .context("sending Razorpay create-order request")?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let detail = serde_json::from_str::<RazorpayErrorBody>(&body)
        .map(|b| format!("{}: {}", b.error.code, b.error.description))
        .unwrap_or(body);
      error!(status = status.as_u16(), detail = %detail, "Razorpay rejected create-order request");
      return Err(anyhow!("Razorpay create-order returned {status}: {detail}"));
    }

    response
      .json::<GatewayOrder>()
      .await
      .context("decoding Razorpay order response")
  }
}
