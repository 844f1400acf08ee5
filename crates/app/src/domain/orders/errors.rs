//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    catalog::records::BookUuid,
    orders::status::{InvalidTransition, OrderStatus},
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("not enough stock for book {0}")]
    InsufficientStock(BookUuid),

    #[error("order not found")]
    NotFound,

    #[error("order is {0}")]
    InvalidState(OrderStatus),

    #[error("could not allocate a unique claim code")]
    ClaimCodeExhausted,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<InvalidTransition> for OrdersServiceError {
    fn from(error: InvalidTransition) -> Self {
        Self::InvalidState(error.from)
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_reports_current_status() {
        let error = OrdersServiceError::from(InvalidTransition {
            from: OrderStatus::Completed,
        });

        assert!(
            matches!(error, OrdersServiceError::InvalidState(OrderStatus::Completed)),
            "expected InvalidState(Completed), got {error:?}"
        );
        assert_eq!(error.to_string(), "order is completed");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            OrdersServiceError::from(Error::RowNotFound),
            OrdersServiceError::NotFound
        ));
    }
}
