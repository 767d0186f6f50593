// core/src/order.rs

//! Paid-order persistence.
//!
//! An order row is written exactly once, after a successful signature check,
//! and at most once per gateway payment id. Stores enforce the uniqueness
//! themselves (a unique index, not an in-process lock) because several
//! instances of the service may verify the same payment concurrently.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{CheckoutError, CheckoutResult};
use crate::model::{LineItem, ShippingInfo};
use crate::signature::{VerifiedPayment, MISSING_FIELDS};

pub const PAYMENT_METHOD_ONLINE: &str = "Online";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
  Processing,
  Shipped,
  Delivered,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Processing => "Processing",
      OrderStatus::Shipped => "Shipped",
      OrderStatus::Delivered => "Delivered",
    }
  }
}

impl std::str::FromStr for OrderStatus {
  type Err = CheckoutError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Processing" => Ok(OrderStatus::Processing),
      "Shipped" => Ok(OrderStatus::Shipped),
      "Delivered" => Ok(OrderStatus::Delivered),
      other => Err(CheckoutError::store(anyhow::anyhow!("unknown order status '{other}'"))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
  Paid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
  pub gateway_order_id: String,
  pub gateway_payment_id: String,
  pub gateway_signature: String,
  pub status: PaymentStatus,
}

/// Everything about an order that the client supplies alongside the claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
  pub items: Vec<LineItem>,
  pub shipping_info: Option<ShippingInfo>,
  pub user_id: Option<String>,
  pub total: Decimal,
  pub discount: Decimal,
}

impl OrderDetails {
  pub fn validate(&self) -> CheckoutResult<()> {
    let user_present = self.user_id.as_deref().is_some_and(|u| !u.trim().is_empty());
    let shipping_present = self.shipping_info.as_ref().is_some_and(ShippingInfo::is_complete);
    if self.items.is_empty() || !shipping_present || !user_present {
      return Err(CheckoutError::validation(MISSING_FIELDS));
    }
    if self.items.iter().any(|item| item.quantity <= 0) {
      return Err(CheckoutError::validation("quantity must be positive"));
    }
    if self.total < Decimal::ZERO || self.discount < Decimal::ZERO {
      return Err(CheckoutError::validation("amounts must not be negative"));
    }
    Ok(())
  }
}

/// An order ready to be inserted. Only [`OrderPersister`] builds one, and only
/// from a [`VerifiedPayment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
  pub id: Uuid,
  pub order_items: Vec<LineItem>,
  pub shipping_info: ShippingInfo,
  pub user_id: String,
  pub total: Decimal,
  pub discount: Decimal,
  pub payment_method: String,
  pub payment_info: PaymentInfo,
  pub status: OrderStatus,
  _verified: (),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub order_items: Vec<LineItem>,
  pub shipping_info: ShippingInfo,
  pub user_id: String,
  pub total: Decimal,
  pub discount: Decimal,
  pub payment_method: String,
  pub payment_info: PaymentInfo,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

impl Order {
  pub fn from_new(new_order: NewOrder, created_at: DateTime<Utc>) -> Self {
    Self {
      id: new_order.id,
      order_items: new_order.order_items,
      shipping_info: new_order.shipping_info,
      user_id: new_order.user_id,
      total: new_order.total,
      discount: new_order.discount,
      payment_method: new_order.payment_method,
      payment_info: new_order.payment_info,
      status: new_order.status,
      created_at,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
  Created(Order),
  /// An order for the same gateway payment id already exists; nothing was written.
  AlreadyRecorded(Order),
}

impl PersistOutcome {
  pub fn order(&self) -> &Order {
    match self {
      PersistOutcome::Created(order) | PersistOutcome::AlreadyRecorded(order) => order,
    }
  }

  pub fn is_created(&self) -> bool {
    matches!(self, PersistOutcome::Created(_))
  }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
  /// Inserts `order` unless one with the same `payment_info.gateway_payment_id`
  /// exists, in which case the existing order is returned untouched.
  async fn insert_paid(&self, order: NewOrder) -> CheckoutResult<PersistOutcome>;

  async fn find_by_payment_id(&self, gateway_payment_id: &str) -> CheckoutResult<Option<Order>>;
}

pub struct OrderPersister {
  store: Arc<dyn OrderStore>,
}

impl OrderPersister {
  pub fn new(store: Arc<dyn OrderStore>) -> Self {
    Self { store }
  }

  #[instrument(
    name = "OrderPersister::persist",
    skip_all,
    fields(gateway_order_id = %payment.gateway_order_id(), gateway_payment_id = %payment.gateway_payment_id())
  )]
  pub async fn persist(&self, payment: VerifiedPayment, details: OrderDetails) -> CheckoutResult<PersistOutcome> {
    details.validate()?;
    let (Some(shipping_info), Some(user_id)) = (details.shipping_info, details.user_id) else {
      return Err(CheckoutError::validation(MISSING_FIELDS));
    };

    let new_order = NewOrder {
      id: Uuid::new_v4(),
      order_items: details.items,
      shipping_info,
      user_id,
      total: details.total,
      discount: details.discount,
      payment_method: PAYMENT_METHOD_ONLINE.to_string(),
      payment_info: PaymentInfo {
        gateway_order_id: payment.gateway_order_id().to_string(),
        gateway_payment_id: payment.gateway_payment_id().to_string(),
        gateway_signature: payment.signature().to_string(),
        status: PaymentStatus::Paid,
      },
      status: OrderStatus::Processing,
      _verified: (),
    };

    let outcome = self.store.insert_paid(new_order).await?;
    match &outcome {
      PersistOutcome::Created(order) => info!(order_id = %order.id, "Paid order recorded."),
      PersistOutcome::AlreadyRecorded(order) => {
        info!(order_id = %order.id, "Payment already recorded, no new order written.")
      }
    }
    Ok(outcome)
  }
}
