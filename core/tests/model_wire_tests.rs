// tests/model_wire_tests.rs
mod common;

use checkout_core::order::{PaymentStatus, PAYMENT_METHOD_ONLINE};
use checkout_core::{GatewayOrder, LineItem, Order, OrderStatus, PaymentInfo, ShippingInfo};
use chrono::{TimeZone, Utc};
use common::*;
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;

#[test]
fn line_items_accept_the_client_shape() {
  let item: LineItem = serde_json::from_value(json!({
    "productId": "p1",
    "quantity": 3,
    "name": "Desk Lamp",
    "price": 10.5
  }))
  .unwrap();
  assert_eq!(item.product_id, "p1");
  assert_eq!(item.quantity, 3);
  assert_eq!(item.price, Some(dec!(10.5)));

  let bare: LineItem = serde_json::from_value(json!({ "productId": "p2", "quantity": 1 })).unwrap();
  assert_eq!(bare, LineItem::new("p2", 1));
}

#[test]
fn partial_shipping_info_deserializes_but_is_incomplete() {
  let info: ShippingInfo = serde_json::from_value(json!({ "address": "12 MG Road", "pinCode": "560001" })).unwrap();
  assert_eq!(info.pin_code, "560001");
  assert!(!info.is_complete());
  assert!(shipping().is_complete());
}

#[test]
fn gateway_order_tolerates_missing_optional_fields() {
  let order: GatewayOrder =
    serde_json::from_value(json!({ "id": "order_x", "amount": 74000, "currency": "INR", "entity": "order" })).unwrap();
  assert_eq!(order.amount, 74_000);
  assert!(order.status.is_empty());
}

#[test]
fn orders_serialize_with_camel_case_keys() {
  let order = Order {
    id: Uuid::nil(),
    order_items: vec![item("p1", 2)],
    shipping_info: shipping(),
    user_id: "user-1".to_string(),
    total: dec!(1416),
    discount: dec!(0),
    payment_method: PAYMENT_METHOD_ONLINE.to_string(),
    payment_info: PaymentInfo {
      gateway_order_id: "order_1".to_string(),
      gateway_payment_id: "pay_1".to_string(),
      gateway_signature: "sig".to_string(),
      status: PaymentStatus::Paid,
    },
    status: OrderStatus::Processing,
    created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
  };
  let value = serde_json::to_value(&order).unwrap();

  assert_eq!(value["paymentMethod"], "Online");
  assert_eq!(value["status"], "Processing");
  assert_eq!(value["paymentInfo"]["status"], "Paid");
  assert_eq!(value["paymentInfo"]["gatewayPaymentId"], "pay_1");
  assert_eq!(value["orderItems"][0]["productId"], "p1");
  assert_eq!(value["shippingInfo"]["pinCode"], "411001");
  assert!(value.get("createdAt").is_some());
}
