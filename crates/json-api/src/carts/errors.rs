//! Errors

use salvo::http::StatusError;
use tracing::error;

use bookstore_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Book is already in the cart"),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::OutOfStock(book) => StatusError::bad_request()
            .brief("Not enough stock")
            .detail(format!("book {book} does not have enough stock")),
        CartsServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CartsServiceError::NotFound => StatusError::not_found().brief("Book not found in cart"),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
