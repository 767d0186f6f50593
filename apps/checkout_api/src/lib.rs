// apps/checkout_api/src/lib.rs

//! HTTP surface for payment-intent creation and verification.
//!
//! `POST /api/v1/payment/create` prices a cart and opens a gateway order;
//! `POST /api/v1/payment/verify` authenticates the gateway's signature and
//! records the paid order once. Both run as pipelines registered on
//! [`state::AppState`].

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod web;

pub use config::{AppConfig, AuthPolicy};
pub use errors::AppError;
pub use state::{AppState, CheckoutServices};
