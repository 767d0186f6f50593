// apps/checkout_api/src/models/mod.rs

//! Row types as stored in PostgreSQL, and their conversions into the
//! checkout domain types.

pub mod coupon;
pub mod intent;
pub mod order;
pub mod product;

pub use coupon::CouponRow;
pub use intent::IntentRow;
pub use order::OrderRow;
pub use product::ProductRow;
