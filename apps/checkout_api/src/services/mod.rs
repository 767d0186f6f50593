// apps/checkout_api/src/services/mod.rs

pub mod intent_sweeper;
pub mod razorpay;

pub use intent_sweeper::{spawn_intent_sweeper, sweep_once};
pub use razorpay::RazorpayGateway;
