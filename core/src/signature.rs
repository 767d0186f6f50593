// core/src/signature.rs

//! Authenticates a completed payment.
//!
//! The gateway signs `"<order_id>|<payment_id>"` with HMAC-SHA256 under the
//! shared secret and hands the lowercase hex digest to the client. A claim
//! passes only when the recomputed digest equals the claimed signature
//! exactly. This is the only path that turns a claim into a
//! [`VerifiedPayment`], and only a `VerifiedPayment` can be persisted.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{instrument, warn};

use crate::error::{CheckoutError, CheckoutResult};

type HmacSha256 = Hmac<Sha256>;

pub const MISSING_FIELDS: &str = "missing verification fields";
pub const SIGNATURE_MISMATCH: &str = "signature mismatch";

/// Identifiers and signature returned to the client by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationClaim {
  pub gateway_order_id: Option<String>,
  pub gateway_payment_id: Option<String>,
  pub signature: Option<String>,
}

impl VerificationClaim {
  pub fn new(
    gateway_order_id: impl Into<String>,
    gateway_payment_id: impl Into<String>,
    signature: impl Into<String>,
  ) -> Self {
    Self {
      gateway_order_id: Some(gateway_order_id.into()),
      gateway_payment_id: Some(gateway_payment_id.into()),
      signature: Some(signature.into()),
    }
  }
}

/// A claim that passed verification. Not constructible outside this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayment {
  gateway_order_id: String,
  gateway_payment_id: String,
  signature: String,
}

impl VerifiedPayment {
  pub fn gateway_order_id(&self) -> &str {
    &self.gateway_order_id
  }

  pub fn gateway_payment_id(&self) -> &str {
    &self.gateway_payment_id
  }

  pub fn signature(&self) -> &str {
    &self.signature
  }
}

#[derive(Clone)]
pub struct SignatureVerifier {
  keyed: HmacSha256,
}

impl std::fmt::Debug for SignatureVerifier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SignatureVerifier").field("secret", &"[REDACTED]").finish()
  }
}

impl SignatureVerifier {
  /// Fails with `Configuration` on an empty secret. Build this once at
  /// startup so a missing secret stops the process before it takes traffic.
  pub fn new(secret: impl Into<String>) -> CheckoutResult<Self> {
    let secret = secret.into();
    if secret.trim().is_empty() {
      return Err(CheckoutError::Configuration("signing secret missing".to_string()));
    }
    let keyed = HmacSha256::new_from_slice(secret.as_bytes())
      .map_err(|_| CheckoutError::Configuration("signing secret rejected".to_string()))?;
    Ok(Self { keyed })
  }

  /// Lowercase hex HMAC-SHA256 of `"<order_id>|<payment_id>"`.
  pub fn sign(&self, gateway_order_id: &str, gateway_payment_id: &str) -> String {
    let mut mac = self.keyed.clone();
    mac.update(gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(gateway_payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
  }

  #[instrument(
    name = "SignatureVerifier::verify",
    skip_all,
    fields(gateway_order_id = ?claim.gateway_order_id, gateway_payment_id = ?claim.gateway_payment_id)
  )]
  pub fn verify(&self, claim: &VerificationClaim) -> CheckoutResult<VerifiedPayment> {
    let present = |field: &Option<String>| field.as_deref().filter(|v| !v.is_empty()).map(str::to_string);
    let order_id = present(&claim.gateway_order_id);
    let payment_id = present(&claim.gateway_payment_id);
    let signature = present(&claim.signature);

    let (Some(order_id), Some(payment_id), Some(signature)) = (order_id, payment_id, signature) else {
      warn!("Verification claim is missing fields.");
      return Err(CheckoutError::validation(MISSING_FIELDS));
    };

    let expected = self.sign(&order_id, &payment_id);
    let matches: bool = expected.len() == signature.len() && bool::from(expected.as_bytes().ct_eq(signature.as_bytes()));
    if !matches {
      warn!("Payment signature mismatch.");
      return Err(CheckoutError::Authentication(SIGNATURE_MISMATCH.to_string()));
    }

    Ok(VerifiedPayment {
      gateway_order_id: order_id,
      gateway_payment_id: payment_id,
      signature,
    })
  }
}
