//! Catalog

pub mod classification;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub(crate) use repository::{book_from_row, quantity_to_i32, try_get_quantity};
pub use service::*;
