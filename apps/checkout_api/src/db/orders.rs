// apps/checkout_api/src/db/orders.rs

use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, NewOrder, Order, OrderStore, PersistOutcome};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::warn;

use crate::models::order::PAYMENT_STATUS_PAID;
use crate::models::OrderRow;

const ORDER_COLUMNS: &str = "id, user_id, order_items, shipping_info, total, discount, payment_method, \
   gateway_order_id, gateway_payment_id, gateway_signature, payment_status, status, created_at";

#[derive(Clone)]
pub struct PgOrderStore {
  pool: PgPool,
}

impl PgOrderStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl OrderStore for PgOrderStore {
  /// Relies on the unique index over `gateway_payment_id`: a conflicting
  /// insert returns no row, and the order already stored is read back.
  async fn insert_paid(&self, order: NewOrder) -> CheckoutResult<PersistOutcome> {
    let payment_id = order.payment_info.gateway_payment_id.clone();
    let sql = format!(
      "INSERT INTO orders ({ORDER_COLUMNS}) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW()) \
       ON CONFLICT (gateway_payment_id) DO NOTHING \
       RETURNING {ORDER_COLUMNS}"
    );

    let inserted = sqlx::query_as::<_, OrderRow>(&sql)
      .bind(order.id)
      .bind(&order.user_id)
      .bind(Json(&order.order_items))
      .bind(Json(&order.shipping_info))
      .bind(order.total)
      .bind(order.discount)
      .bind(&order.payment_method)
      .bind(&order.payment_info.gateway_order_id)
      .bind(&order.payment_info.gateway_payment_id)
      .bind(&order.payment_info.gateway_signature)
      .bind(PAYMENT_STATUS_PAID)
      .bind(order.status.as_str())
      .fetch_optional(&self.pool)
      .await
      .map_err(CheckoutError::store)?;

    if let Some(row) = inserted {
      return Ok(PersistOutcome::Created(Order::try_from(row)?));
    }

    match self.find_by_payment_id(&payment_id).await? {
      Some(existing) => Ok(PersistOutcome::AlreadyRecorded(existing)),
      None => {
        warn!(gateway_payment_id = %payment_id, "Insert conflicted but no existing order was found.");
        Err(CheckoutError::store(anyhow::anyhow!(
          "order for payment {payment_id} conflicted but could not be read back"
        )))
      }
    }
  }

  async fn find_by_payment_id(&self, gateway_payment_id: &str) -> CheckoutResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE gateway_payment_id = $1");
    let row = sqlx::query_as::<_, OrderRow>(&sql)
      .bind(gateway_payment_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(CheckoutError::store)?;
    row.map(Order::try_from).transpose()
  }
}
