//! Carts

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub(crate) use repository::PgCartsRepository;
pub use service::*;
