// core/src/pricing.rs

//! Order total computation.
//!
//! subtotal = sum(catalog price x quantity)
//! tax      = subtotal x 18%
//! shipping = 0 above a subtotal of 1000, else 200
//! total    = floor(subtotal + tax + shipping - discount)
//!
//! The floor is applied once, to the final sum. The gateway receives the
//! total in minor units (x100).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{CheckoutError, CheckoutResult};
use crate::model::{CatalogProduct, LineItem};

pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);
pub const FREE_SHIPPING_ABOVE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(200, 0, 0, false, 0);
const MINOR_UNITS_PER_UNIT: i64 = 100;
const OUT_OF_RANGE: &str = "order total out of range";

fn out_of_range() -> CheckoutError {
  CheckoutError::validation(OUT_OF_RANGE)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
  pub product_id: String,
  pub quantity: i64,
  pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
  pub lines: Vec<PricedLine>,
  pub subtotal: Decimal,
  pub tax: Decimal,
  pub shipping: Decimal,
  pub discount: Decimal,
  /// Whole currency units, already floored.
  pub total: i64,
}

impl PriceBreakdown {
  pub fn amount_in_minor_units(&self) -> i64 {
    self.total * MINOR_UNITS_PER_UNIT
  }
}

pub fn shipping_for(subtotal: Decimal) -> Decimal {
  if subtotal > FREE_SHIPPING_ABOVE {
    Decimal::ZERO
  } else {
    SHIPPING_FEE
  }
}

/// Prices `items` against catalog `products`.
///
/// Every requested product must be present in `products`; an unknown id
/// rejects the whole cart instead of being dropped from the subtotal.
pub fn price_cart(items: &[LineItem], products: &[CatalogProduct], discount: Decimal) -> CheckoutResult<PriceBreakdown> {
  if items.is_empty() {
    return Err(CheckoutError::validation("items required"));
  }
  if discount < Decimal::ZERO {
    return Err(CheckoutError::validation("discount must not be negative"));
  }

  let prices: HashMap<&str, Decimal> = products.iter().map(|p| (p.id.as_str(), p.price)).collect();

  let mut lines = Vec::with_capacity(items.len());
  let mut subtotal = Decimal::ZERO;
  for item in items {
    if item.quantity <= 0 {
      return Err(CheckoutError::validation("quantity must be positive"));
    }
    let unit_price = *prices
      .get(item.product_id.as_str())
      .ok_or_else(|| CheckoutError::validation(format!("unknown product: {}", item.product_id)))?;
    subtotal = unit_price
      .checked_mul(Decimal::from(item.quantity))
      .and_then(|line_amount| subtotal.checked_add(line_amount))
      .ok_or_else(out_of_range)?;
    lines.push(PricedLine {
      product_id: item.product_id.clone(),
      quantity: item.quantity,
      unit_price,
    });
  }

  let tax = subtotal.checked_mul(TAX_RATE).ok_or_else(out_of_range)?;
  let shipping = shipping_for(subtotal);
  let total = subtotal
    .checked_add(tax)
    .and_then(|t| t.checked_add(shipping))
    .and_then(|t| t.checked_sub(discount))
    .ok_or_else(out_of_range)?
    .floor();
  if total < Decimal::ONE {
    return Err(CheckoutError::validation("discount exceeds order total"));
  }
  let total = total
    .to_i64()
    .filter(|t| t.checked_mul(MINOR_UNITS_PER_UNIT).is_some())
    .ok_or_else(out_of_range)?;

  Ok(PriceBreakdown {
    lines,
    subtotal,
    tax,
    shipping,
    discount,
    total,
  })
}
