//! List Books Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bookstore_app::domain::catalog::{
    classification::{BookFormat, BookGenre},
    data::{BookFilter, BookSort},
};

use crate::{
    books::{errors::into_status_error, handlers::get::BookResponse, requests::parse_named},
    extensions::*,
    state::State,
};

/// Books Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BooksPageResponse {
    #[serde(flatten)]
    pub meta: PageMeta,

    pub items: Vec<BookResponse>,
}

/// List Books Handler
///
/// Returns a page of the catalog. `search` matches title, author and description;
/// `sort_by` is `price` or `title` (anything else lists newest first) and `order`
/// is `asc` or `desc`. `genre` and `format` narrow the listing to one value each.
#[endpoint(
    tags("books"),
    summary = "List Books",
    responses(
        (status_code = StatusCode::OK, description = "Catalog page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    )
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    on_sale: QueryParam<bool, false>,
    genre: QueryParam<String, false>,
    format: QueryParam<String, false>,
    sort_by: QueryParam<String, false>,
    order: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<BooksPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let sort_by = sort_by.into_inner();
    let order = order.into_inner();

    let sort = BookSort::from_parts(sort_by.as_deref(), order.as_deref())
        .or_400("invalid sort order")?;

    let genre = genre.into_inner();
    let format = format.into_inner();

    let filter = BookFilter {
        search: search.into_inner(),
        on_sale_only: on_sale.into_inner().unwrap_or(false),
        genre: parse_named::<BookGenre>("genre", genre.as_deref())?,
        format: parse_named::<BookFormat>("format", format.as_deref())?,
        sort,
    };

    let now = Timestamp::now();

    let books = state
        .app
        .catalog
        .list_books(filter, page_request(page, page_size)?, now)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BooksPageResponse {
        meta: PageMeta::from(&books),
        items: books
            .items
            .into_iter()
            .map(|book| BookResponse::at(book, now))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bookstore_app::domain::{
        catalog::{MockCatalogService, records::BookUuid},
        pagination::{Page, PageRequest},
    };

    use crate::test_helpers::{Mocks, make_book, public_service};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        public_service(Mocks::catalog(catalog), Router::with_path("books").get(handler))
    }

    #[tokio::test]
    async fn test_index_passes_filter_and_page() -> TestResult {
        let book = make_book(BookUuid::new(), dec!(9.99));
        let request = PageRequest::new(2, 5)?;
        let page = Page::new(vec![book], request, 6);

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_books()
            .once()
            .withf(move |filter, page, _| {
                *filter
                    == BookFilter {
                        search: Some("dune".to_string()),
                        on_sale_only: true,
                        genre: Some(BookGenre::SelfHelp),
                        format: Some(BookFormat::Ebook),
                        sort: BookSort::PriceDesc,
                    }
                    && *page == request
            })
            .return_once(move |_, _, _| Ok(page));

        let response: BooksPageResponse = TestClient::get(
            "http://example.com/books?search=dune&on_sale=true&genre=self_help&format=Ebook&sort_by=price&order=desc&page=2&page_size=5",
        )
        .send(&make_service(catalog))
        .await
        .take_json()
        .await?;

        assert_eq!(response.meta.current_page, 2);
        assert_eq!(response.meta.total_pages, 2);
        assert_eq!(response.meta.total_count, 6);
        assert_eq!(response.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_defaults() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_books()
            .once()
            .withf(|filter, page, _| {
                *filter == BookFilter::default() && *page == PageRequest::default()
            })
            .return_once(|_, page, _| Ok(Page::new(vec![], page, 0)));

        let res = TestClient::get("http://example.com/books")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_unknown_order() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_books().never();

        let res = TestClient::get("http://example.com/books?sort_by=price&order=sideways")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_oversized_page() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_books().never();

        let res = TestClient::get("http://example.com/books?page_size=1000")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_unknown_format() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_books().never();

        let res = TestClient::get("http://example.com/books?format=scroll")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
