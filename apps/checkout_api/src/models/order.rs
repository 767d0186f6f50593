// apps/checkout_api/src/models/order.rs

use checkout_core::order::PaymentStatus;
use checkout_core::{CheckoutError, CheckoutResult, LineItem, Order, OrderStatus, PaymentInfo, ShippingInfo};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const PAYMENT_STATUS_PAID: &str = "Paid";

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
  pub id: Uuid,
  pub user_id: String,
  pub order_items: Json<Vec<LineItem>>,
  pub shipping_info: Json<ShippingInfo>,
  pub total: Decimal,
  pub discount: Decimal,
  pub payment_method: String,
  pub gateway_order_id: String,
  pub gateway_payment_id: String,
  pub gateway_signature: String,
  pub payment_status: String,
  pub status: String,
  pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
  type Error = CheckoutError;

  fn try_from(row: OrderRow) -> CheckoutResult<Self> {
    let payment_status = match row.payment_status.as_str() {
      PAYMENT_STATUS_PAID => PaymentStatus::Paid,
      other => {
        return Err(CheckoutError::store(anyhow::anyhow!(
          "unknown payment status '{other}' on order {}",
          row.id
        )))
      }
    };
    Ok(Order {
      id: row.id,
      order_items: row.order_items.0,
      shipping_info: row.shipping_info.0,
      user_id: row.user_id,
      total: row.total,
      discount: row.discount,
      payment_method: row.payment_method,
      payment_info: PaymentInfo {
        gateway_order_id: row.gateway_order_id,
        gateway_payment_id: row.gateway_payment_id,
        gateway_signature: row.gateway_signature,
        status: payment_status,
      },
      status: row.status.parse::<OrderStatus>()?,
      created_at: row.created_at,
    })
  }
}
