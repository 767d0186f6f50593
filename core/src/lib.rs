// core/src/lib.rs

//! Payment-intent creation and verification for an order-checkout backend.
//!
//! The flow this crate covers:
//!  1. price a cart from catalog prices plus an optional coupon ([`pricing`], [`coupon`]);
//!  2. open a gateway order ("intent") for the computed total ([`intent`]);
//!  3. after the customer pays, authenticate the gateway's HMAC signature ([`signature`]);
//!  4. persist the paid order exactly once per gateway payment ([`order`]).
//!
//! Storage, catalog and gateway access sit behind traits; in-process
//! implementations live in [`memory`]. The HTTP application wires these
//! together as [`pipeline`]s.

pub mod catalog;
pub mod coupon;
pub mod error;
pub mod gateway;
pub mod intent;
pub mod ledger;
pub mod memory;
pub mod model;
pub mod order;
pub mod pipeline;
pub mod pricing;
pub mod signature;

pub use crate::catalog::Catalog;
pub use crate::coupon::{resolve_discount, CouponStore};
pub use crate::error::{CheckoutError, CheckoutResult};
pub use crate::gateway::{GatewayOrder, GatewayOrderRequest, PaymentGateway};
pub use crate::intent::{IntentCreator, PaymentIntent};
pub use crate::ledger::{IntentLedger, IntentRecord, IntentStatus};
pub use crate::model::{CatalogProduct, Coupon, LineItem, ShippingInfo};
pub use crate::order::{NewOrder, Order, OrderDetails, OrderPersister, OrderStatus, OrderStore, PaymentInfo, PersistOutcome};
pub use crate::pipeline::{ContextData, Pipeline, PipelineControl, PipelineError, PipelineRegistry, PipelineResult};
pub use crate::pricing::{price_cart, PriceBreakdown, PricedLine};
pub use crate::signature::{SignatureVerifier, VerificationClaim, VerifiedPayment};
