//! Get Book Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_app::domain::catalog::records::BookRecord;

use crate::{books::errors::into_status_error, extensions::*, state::State};

/// Book Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookResponse {
    /// The unique identifier of the book
    pub uuid: Uuid,

    pub title: String,

    pub author: String,

    pub isbn: String,

    pub description: String,

    /// Base price
    pub price: String,

    /// Price a checkout would charge right now
    pub effective_price: String,

    /// Whether a sale is running right now
    pub on_sale: bool,

    /// Sale price, present only while the sale is running
    pub sale_price: Option<String>,

    /// When the running sale ends, if it has an end
    pub sale_end: Option<String>,

    /// Units on hand
    pub stock_quantity: u32,

    /// Snake case genre, e.g. `non_fiction`
    pub genre: String,

    /// Snake case format, e.g. `signed_edition`
    pub format: String,

    pub publication_date: Option<String>,
}

impl BookResponse {
    /// Project a book as a customer sees it at `now`.
    pub(crate) fn at(book: BookRecord, now: Timestamp) -> Self {
        let terms = book.price_terms();
        let sale_price = terms.active_sale_price(now);

        Self {
            uuid: book.uuid.into_uuid(),
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            description: book.description,
            price: book.price.to_string(),
            effective_price: terms.effective_unit_price(now).to_string(),
            on_sale: sale_price.is_some(),
            sale_price: sale_price.map(|price| price.to_string()),
            sale_end: sale_price
                .and(book.sale_end)
                .map(|end| end.to_string()),
            stock_quantity: book.stock_quantity,
            genre: book.genre.to_string(),
            format: book.format.to_string(),
            publication_date: book.publication_date.map(|date| date.to_string()),
        }
    }
}

/// Get Book Handler
///
/// Returns a single book with its current price.
#[endpoint(
    tags("books"),
    summary = "Get Book",
    responses(
        (status_code = StatusCode::OK, description = "Book found"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
    )
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let book = state
        .app
        .catalog
        .get_book(book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(BookResponse::at(book, Timestamp::now())))
}
