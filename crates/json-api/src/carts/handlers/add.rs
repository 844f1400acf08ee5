//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, handlers::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Handler
///
/// Adds one unit of a book to the caller's cart.
#[endpoint(
    tags("cart"),
    summary = "Add Book to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book added"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Not enough stock"),
    ),
)]
#[tracing::instrument(
    name = "cart.add",
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
        .add_item(identity.user_uuid, book.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
