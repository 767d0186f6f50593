// apps/checkout_api/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.razorpay.com/v1";

/// Who may open and verify payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
  /// No identity required; `customerName` annotates the gateway order.
  Guest,
  /// Both endpoints require the `X-User-ID` header set by the auth layer.
  Authenticated,
}

impl FromStr for AuthPolicy {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "guest" => Ok(AuthPolicy::Guest),
      "authenticated" => Ok(AuthPolicy::Authenticated),
      other => Err(AppError::Config(format!(
        "Invalid CHECKOUT_AUTH_POLICY '{other}' (expected 'guest' or 'authenticated')"
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Text,
  Json,
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  pub razorpay_key_id: String,
  pub razorpay_key_secret: String,
  pub signing_secret: String,
  pub razorpay_api_base: String,

  pub currency: String,
  pub gateway_timeout: Duration,
  pub auth_policy: AuthPolicy,
  pub intent_ttl: Duration,
  pub intent_sweep_interval: Duration,
  pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &"[REDACTED]")
      .field("razorpay_key_id", &self.razorpay_key_id)
      .field("razorpay_key_secret", &"[REDACTED]")
      .field("signing_secret", &"[REDACTED]")
      .field("razorpay_api_base", &self.razorpay_api_base)
      .field("currency", &self.currency)
      .field("gateway_timeout", &self.gateway_timeout)
      .field("auth_policy", &self.auth_policy)
      .field("intent_ttl", &self.intent_ttl)
      .field("intent_sweep_interval", &self.intent_sweep_interval)
      .field("log_format", &self.log_format)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from an arbitrary variable source. Empty values count
  /// as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).filter(|v| !v.trim().is_empty());
    let require = |var_name: &str| {
      get_env(var_name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{var_name}'")))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = parse_or("SERVER_PORT", get_env("SERVER_PORT"), 8080u16)?;
    let database_url = require("DATABASE_URL")?;

    let razorpay_key_id = require("RAZORPAY_KEY_ID")?;
    let razorpay_key_secret = require("RAZORPAY_SECRET")?;
    let signing_secret = get_env("RAZORPAY_SIGNING_SECRET").unwrap_or_else(|| razorpay_key_secret.clone());
    let razorpay_api_base = get_env("RAZORPAY_API_BASE")
      .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
      .trim_end_matches('/')
      .to_string();

    let currency = get_env("CHECKOUT_CURRENCY").unwrap_or_else(|| "INR".to_string());
    let gateway_timeout = Duration::from_secs(parse_or("GATEWAY_TIMEOUT_SECS", get_env("GATEWAY_TIMEOUT_SECS"), 10u64)?);
    let auth_policy = get_env("CHECKOUT_AUTH_POLICY")
      .map(|v| v.parse::<AuthPolicy>())
      .transpose()?
      .unwrap_or(AuthPolicy::Guest);
    let intent_ttl = Duration::from_secs(parse_or("INTENT_TTL_SECS", get_env("INTENT_TTL_SECS"), 1800u64)?);
    let intent_sweep_interval = Duration::from_secs(parse_or(
      "INTENT_SWEEP_INTERVAL_SECS",
      get_env("INTENT_SWEEP_INTERVAL_SECS"),
      60u64,
    )?);
    let log_format = match get_env("LOG_FORMAT").map(|v| v.to_ascii_lowercase()).as_deref() {
      None | Some("text") => LogFormat::Text,
      Some("json") => LogFormat::Json,
      Some(other) => return Err(AppError::Config(format!("Invalid LOG_FORMAT '{other}'"))),
    };

    if gateway_timeout.is_zero() || intent_sweep_interval.is_zero() {
      return Err(AppError::Config(
        "GATEWAY_TIMEOUT_SECS and INTENT_SWEEP_INTERVAL_SECS must be positive".to_string(),
      ));
    }

    Ok(Self {
      server_host,
      server_port,
      database_url,
      razorpay_key_id,
      razorpay_key_secret,
      signing_secret,
      razorpay_api_base,
      currency,
      gateway_timeout,
      auth_policy,
      intent_ttl,
      intent_sweep_interval,
      log_format,
    })
  }
}

fn parse_or<T>(var_name: &str, raw: Option<String>, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match raw {
    None => Ok(default),
    Some(value) => value
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {var_name}: {e}"))),
  }
}
