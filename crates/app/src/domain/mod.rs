//! Bookstore Domain Concerns

pub mod carts;
pub mod catalog;
pub mod orders;
pub mod pagination;
pub mod pricing;
pub mod users;
