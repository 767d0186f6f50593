// apps/checkout_api/src/web/handlers/mod.rs

pub mod payment_handlers;
