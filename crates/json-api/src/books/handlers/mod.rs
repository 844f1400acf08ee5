//! Book Handlers

pub(crate) mod best_sellers;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;
