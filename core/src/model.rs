// core/src/model.rs

//! Wire and domain types shared by the checkout flow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line as submitted by the client.
///
/// `price` and `name` are carried through to the stored order for display,
/// but pricing never reads `price`: unit prices always come from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
  pub product_id: String,
  pub quantity: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub photo: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub price: Option<Decimal>,
}

impl LineItem {
  pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
    Self {
      product_id: product_id.into(),
      quantity,
      name: None,
      photo: None,
      price: None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
  #[serde(default)]
  pub address: String,
  #[serde(default)]
  pub city: String,
  #[serde(default)]
  pub state: String,
  #[serde(default)]
  pub country: String,
  #[serde(default)]
  pub pin_code: String,
}

impl ShippingInfo {
  /// Address and city are what the gateway receipt annotation needs.
  pub fn is_complete(&self) -> bool {
    !self.address.trim().is_empty() && !self.city.trim().is_empty()
  }

  pub fn short_address(&self) -> String {
    format!("{}, {}", self.address.trim(), self.city.trim())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
  pub code: String,
  pub amount: Decimal,
}

/// Authoritative catalog entry for pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
  pub id: String,
  pub name: String,
  pub price: Decimal,
}
