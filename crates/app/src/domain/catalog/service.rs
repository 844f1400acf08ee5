//! Catalog service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        catalog::{
            data::{BookFilter, BookUpdate, NewBook},
            errors::CatalogServiceError,
            records::{BookRecord, BookUuid},
            repository::PgBooksRepository,
        },
        pagination::{Page, PageRequest},
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgBooksRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBooksRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_books(
        &self,
        filter: BookFilter,
        page: PageRequest,
        point_in_time: Timestamp,
    ) -> Result<Page<BookRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let total_count = self
            .repository
            .count_books(&mut tx, &filter, point_in_time)
            .await?;

        let books = self
            .repository
            .list_books(&mut tx, &filter, page, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(Page::new(books, page, total_count))
    }

    async fn get_book(&self, book: BookUuid) -> Result<BookRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let book = self.repository.get_book(&mut tx, book).await?;

        tx.commit().await?;

        Ok(book)
    }

    async fn create_book(&self, book: NewBook) -> Result<BookRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_book(&mut tx, &book).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_book(
        &self,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<BookRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_book(&mut tx, book, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve one page of the catalog, with sale filtering evaluated at `point_in_time`.
    async fn list_books(
        &self,
        filter: BookFilter,
        page: PageRequest,
        point_in_time: Timestamp,
    ) -> Result<Page<BookRecord>, CatalogServiceError>;

    /// Retrieve a single book.
    async fn get_book(&self, book: BookUuid) -> Result<BookRecord, CatalogServiceError>;

    /// Add a book to the catalog.
    async fn create_book(&self, book: NewBook) -> Result<BookRecord, CatalogServiceError>;

    /// Replace a book's price, stock and sale terms.
    async fn update_book(
        &self,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<BookRecord, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        domain::catalog::{
            classification::{BookFormat, BookGenre},
            data::BookSort,
        },
        test::{TestContext, helpers::create_book},
    };

    use super::*;

    fn titles(page: &Page<BookRecord>) -> Vec<&str> {
        page.items.iter().map(|book| book.title.as_str()).collect()
    }

    #[tokio::test]
    async fn list_books_sorts_and_paginates() -> TestResult {
        let ctx = TestContext::new().await;

        create_book(&ctx, "Middlemarch", dec!(12.00), 3).await?;
        create_book(&ctx, "Beloved", dec!(18.50), 3).await?;
        create_book(&ctx, "Walden", dec!(6.25), 3).await?;

        let by_price = ctx
            .catalog
            .list_books(
                BookFilter {
                    sort: BookSort::PriceAsc,
                    ..BookFilter::default()
                },
                PageRequest::new(1, 2)?,
                Timestamp::now(),
            )
            .await?;

        assert_eq!(titles(&by_price), vec!["Walden", "Middlemarch"]);
        assert_eq!(by_price.total_count, 3);
        assert_eq!(by_price.total_pages, 2);

        let last_page = ctx
            .catalog
            .list_books(
                BookFilter {
                    sort: BookSort::TitleDesc,
                    ..BookFilter::default()
                },
                PageRequest::new(2, 2)?,
                Timestamp::now(),
            )
            .await?;

        assert_eq!(titles(&last_page), vec!["Beloved"]);

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_title_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        create_book(&ctx, "The Left Hand of Darkness", dec!(9.99), 1).await?;
        create_book(&ctx, "Dune", dec!(9.99), 1).await?;

        let page = ctx
            .catalog
            .list_books(
                BookFilter {
                    search: Some("left HAND".to_string()),
                    ..BookFilter::default()
                },
                PageRequest::default(),
                Timestamp::now(),
            )
            .await?;

        assert_eq!(titles(&page), vec!["The Left Hand of Darkness"]);

        Ok(())
    }

    #[tokio::test]
    async fn on_sale_filter_respects_window() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let running = create_book(&ctx, "Running", dec!(10.00), 1).await?;
        let expired = create_book(&ctx, "Expired", dec!(10.00), 1).await?;

        create_book(&ctx, "Full Price", dec!(10.00), 1).await?;

        let sale = |start: Timestamp, end: Timestamp| BookUpdate {
            price: dec!(10.00),
            stock_quantity: 1,
            on_sale: true,
            sale_price: Some(dec!(7.50)),
            sale_start: Some(start),
            sale_end: Some(end),
        };

        ctx.catalog
            .update_book(
                running.uuid,
                sale(now - SignedDuration::from_hours(1), now + SignedDuration::from_hours(1)),
            )
            .await?;

        ctx.catalog
            .update_book(
                expired.uuid,
                sale(now - SignedDuration::from_hours(2), now - SignedDuration::from_hours(1)),
            )
            .await?;

        let page = ctx
            .catalog
            .list_books(
                BookFilter {
                    on_sale_only: true,
                    ..BookFilter::default()
                },
                PageRequest::default(),
                now,
            )
            .await?;

        assert_eq!(titles(&page), vec!["Running"]);

        let book = page.items.first().ok_or("sale book missing")?;

        assert_eq!(book.effective_price(now), dec!(7.50));

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_book_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_book(BookUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn inverted_sale_window_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let book = create_book(&ctx, "Dune", dec!(10.00), 1).await?;
        let now = Timestamp::now();

        let result = ctx
            .catalog
            .update_book(
                book.uuid,
                BookUpdate {
                    price: dec!(10.00),
                    stock_quantity: 1,
                    on_sale: true,
                    sale_price: Some(dec!(8.00)),
                    sale_start: Some(now),
                    sale_end: Some(now - SignedDuration::from_hours(1)),
                },
            )
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn genre_and_format_filters_narrow_the_listing() -> TestResult {
        let ctx = TestContext::new().await;

        for (title, genre, format) in [
            ("Dune", BookGenre::Fiction, BookFormat::Paperback),
            ("Dune Deluxe", BookGenre::Fiction, BookFormat::DeluxeEdition),
            ("Cosmos", BookGenre::Science, BookFormat::Paperback),
        ] {
            ctx.catalog
                .create_book(NewBook {
                    uuid: BookUuid::new(),
                    title: title.to_string(),
                    author: "Test Author".to_string(),
                    isbn: String::new(),
                    description: String::new(),
                    price: dec!(10.00),
                    stock_quantity: 1,
                    genre,
                    format,
                    publication_date: None,
                })
                .await?;
        }

        let fiction = ctx
            .catalog
            .list_books(
                BookFilter {
                    genre: Some(BookGenre::Fiction),
                    sort: BookSort::TitleAsc,
                    ..BookFilter::default()
                },
                PageRequest::default(),
                Timestamp::now(),
            )
            .await?;

        assert_eq!(titles(&fiction), vec!["Dune", "Dune Deluxe"]);
        assert_eq!(fiction.total_count, 2);

        let fiction_paperbacks = ctx
            .catalog
            .list_books(
                BookFilter {
                    genre: Some(BookGenre::Fiction),
                    format: Some(BookFormat::Paperback),
                    ..BookFilter::default()
                },
                PageRequest::default(),
                Timestamp::now(),
            )
            .await?;

        assert_eq!(titles(&fiction_paperbacks), vec!["Dune"]);
        assert_eq!(fiction_paperbacks.total_count, 1);
        assert_eq!(
            fiction_paperbacks.items.first().map(|book| book.format),
            Some(BookFormat::Paperback)
        );

        Ok(())
    }
}
