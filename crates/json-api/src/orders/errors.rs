//! Errors

use salvo::http::StatusError;
use tracing::error;

use bookstore_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InsufficientStock(book) => StatusError::bad_request()
            .brief("Not enough stock")
            .detail(format!("book {book} does not have enough stock")),
        OrdersServiceError::InvalidState(status) => StatusError::bad_request()
            .brief("Order cannot be changed")
            .detail(format!("order is {status}")),
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::ClaimCodeExhausted => {
            error!("failed to allocate a unique claim code");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use bookstore_app::domain::{catalog::records::BookUuid, orders::status::OrderStatus};

    use super::*;

    #[test]
    fn workflow_rejections_are_client_errors() {
        for error in [
            OrdersServiceError::EmptyCart,
            OrdersServiceError::InsufficientStock(BookUuid::new()),
            OrdersServiceError::InvalidState(OrderStatus::Completed),
        ] {
            assert_eq!(into_status_error(error).code, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn exhausted_claim_codes_are_server_errors() {
        assert_eq!(
            into_status_error(OrdersServiceError::ClaimCodeExhausted).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
