//! Create Book Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bookstore_app::domain::catalog::{data::NewBook, records::BookUuid};

use crate::{
    books::{
        errors::into_status_error,
        handlers::get::BookResponse,
        requests::{parse_money, parse_named, parse_timestamp},
    },
    extensions::*,
    state::State,
};

/// Create Book Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,

    #[serde(default)]
    pub description: String,

    /// Base price as a decimal string, e.g. `"12.99"`
    pub price: String,

    pub stock_quantity: u32,

    /// e.g. `"fiction"`, `"nonFiction"`; defaults to `"other"`
    pub genre: Option<String>,

    /// e.g. `"paperback"`, `"ebook"`; defaults to `"other"`
    pub format: Option<String>,

    /// RFC 3339 timestamp
    pub publication_date: Option<String>,
}

impl CreateBookRequest {
    fn into_new_book(self, uuid: BookUuid) -> Result<NewBook, StatusError> {
        if self.title.trim().is_empty() || self.author.trim().is_empty() {
            return Err(StatusError::bad_request().brief("\"title\" and \"author\" are required"));
        }

        Ok(NewBook {
            uuid,
            price: parse_money("price", &self.price)?,
            genre: parse_named("genre", self.genre.as_deref())?.unwrap_or_default(),
            format: parse_named("format", self.format.as_deref())?.unwrap_or_default(),
            publication_date: parse_timestamp("publicationDate", self.publication_date.as_deref())?,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            description: self.description,
            stock_quantity: self.stock_quantity,
        })
    }
}

/// Create Book Handler
#[endpoint(
    tags("books"),
    summary = "Create Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Book created"),
        (status_code = StatusCode::CONFLICT, description = "A book with this ISBN already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let new_book = json.into_inner().into_new_book(BookUuid::new())?;

    let book = state
        .app
        .catalog
        .create_book(new_book)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/books/{}", book.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(BookResponse::at(book, Timestamp::now())))
}
