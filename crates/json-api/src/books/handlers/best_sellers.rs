//! Best Sellers Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_app::domain::orders::records::BestSellerRecord;

use crate::{books::errors::best_sellers_status_error, extensions::*, state::State};

/// Best Seller Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BestSellerResponse {
    pub book_uuid: Uuid,
    pub title: String,
    pub author: String,

    /// Units sold across collected orders
    pub total_sold: u64,
}

impl From<BestSellerRecord> for BestSellerResponse {
    fn from(record: BestSellerRecord) -> Self {
        Self {
            book_uuid: record.book_uuid.into_uuid(),
            title: record.title,
            author: record.author,
            total_sold: record.total_sold,
        }
    }
}

/// Best Sellers Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BestSellersPageResponse {
    #[serde(flatten)]
    pub meta: PageMeta,

    pub items: Vec<BestSellerResponse>,
}

/// Best Sellers Handler
///
/// Books ranked by units sold on collected orders. Books that have sold fewer than
/// five units are not listed.
#[endpoint(
    tags("books"),
    summary = "Best Sellers",
    responses(
        (status_code = StatusCode::OK, description = "Best sellers page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    )
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<BestSellersPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let best_sellers = state
        .app
        .orders
        .best_sellers(page_request(page, page_size)?)
        .await
        .map_err(best_sellers_status_error)?;

    Ok(Json(BestSellersPageResponse {
        meta: PageMeta::from(&best_sellers),
        items: best_sellers.items.into_iter().map(Into::into).collect(),
    }))
}
