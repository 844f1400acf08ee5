//! Book Errors

use salvo::http::StatusError;
use tracing::error;

use bookstore_app::domain::{catalog::CatalogServiceError, orders::OrdersServiceError};

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => StatusError::conflict().brief("Book already exists"),
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid book payload")
        }
        CatalogServiceError::NotFound => StatusError::not_found().brief("Book not found"),
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Best sellers are an order read model; every failure is a server error.
pub(crate) fn best_sellers_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Sql(source) => error!("best sellers storage error: {source}"),
        other => error!("failed to fetch best sellers: {other}"),
    }

    StatusError::internal_server_error()
}
