//! Update Book Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_app::domain::catalog::data::BookUpdate;

use crate::{
    books::{
        errors::into_status_error,
        handlers::get::BookResponse,
        requests::{parse_money, parse_timestamp},
    },
    extensions::*,
    state::State,
};

/// Update Book Request
///
/// Replaces the book's price, stock and sale terms.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBookRequest {
    /// Base price as a decimal string
    pub price: String,

    pub stock_quantity: u32,

    #[serde(default)]
    pub on_sale: bool,

    pub sale_price: Option<String>,

    /// RFC 3339 timestamp; open-ended when absent
    pub sale_start: Option<String>,

    /// RFC 3339 timestamp; open-ended when absent
    pub sale_end: Option<String>,
}

impl TryFrom<UpdateBookRequest> for BookUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateBookRequest) -> Result<Self, Self::Error> {
        let sale_start = parse_timestamp("saleStart", request.sale_start.as_deref())?;
        let sale_end = parse_timestamp("saleEnd", request.sale_end.as_deref())?;

        if let (Some(start), Some(end)) = (sale_start, sale_end)
            && start > end
        {
            return Err(StatusError::bad_request().brief("\"saleStart\" must not be after \"saleEnd\""));
        }

        Ok(Self {
            price: parse_money("price", &request.price)?,
            stock_quantity: request.stock_quantity,
            on_sale: request.on_sale,
            sale_price: request
                .sale_price
                .as_deref()
                .map(|price| parse_money("salePrice", price))
                .transpose()?,
            sale_start,
            sale_end,
        })
    }
}

/// Update Book Handler
#[endpoint(
    tags("books"),
    summary = "Update Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<UpdateBookRequest>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = BookUpdate::try_from(json.into_inner())?;

    let book = state
        .app
        .catalog
        .update_book(book.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BookResponse::at(book, Timestamp::now())))
}
