//! Orders
//!
//! Checkout, pickup and cancellation of orders, plus the read models over them.

pub mod builder;
pub mod claim_codes;
pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod status;
mod stock;

pub use errors::OrdersServiceError;
pub use service::*;
