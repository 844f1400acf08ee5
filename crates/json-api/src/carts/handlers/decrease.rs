//! Decrease Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, handlers::CartItemResponse},
    extensions::*,
    state::State,
};

/// Decrease Cart Item Handler
///
/// Takes one unit of a book out of the cart. The line is removed once its quantity
/// would reach zero, in which case the response reports a quantity of zero.
#[endpoint(
    tags("cart"),
    summary = "Decrease Book Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity decreased"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not in cart"),
    ),
)]
#[tracing::instrument(
    name = "cart.decrease",
    skip(book, depot),
    fields(
        user_uuid = tracing::field::Empty,
        book_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let book = book.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(identity.user_uuid));
    span.record("book_uuid", tracing::field::display(book));

    let item = state
        .app
        .carts
        .decrease_item(identity.user_uuid, book.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.map_or(
        CartItemResponse {
            book_uuid: book,
            quantity: 0,
        },
        Into::into,
    )))
}
