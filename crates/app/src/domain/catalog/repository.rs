//! Books Repository

use std::str::FromStr;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    catalog::{
        classification::{BookFormat, BookGenre},
        data::{BookFilter, BookUpdate, NewBook},
        records::{BookRecord, BookUuid},
    },
    pagination::{PageRequest, count_from_i64},
};

const LIST_BOOKS_SQL: &str = include_str!("sql/list_books.sql");
const COUNT_BOOKS_SQL: &str = include_str!("sql/count_books.sql");
const GET_BOOK_SQL: &str = include_str!("sql/get_book.sql");
const CREATE_BOOK_SQL: &str = include_str!("sql/create_book.sql");
const UPDATE_BOOK_SQL: &str = include_str!("sql/update_book.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &BookFilter,
        page: PageRequest,
        point_in_time: Timestamp,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(LIST_BOOKS_SQL)
            .bind(filter.search_pattern())
            .bind(filter.on_sale_only)
            .bind(SqlxTimestamp::from(point_in_time))
            .bind(filter.sort.as_str())
            .bind(page.limit())
            .bind(page.offset())
            .bind(filter.genre.map(BookGenre::as_str))
            .bind(filter.format.map(BookFormat::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &BookFilter,
        point_in_time: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_BOOKS_SQL)
            .bind(filter.search_pattern())
            .bind(filter.on_sale_only)
            .bind(SqlxTimestamp::from(point_in_time))
            .bind(filter.genre.map(BookGenre::as_str))
            .bind(filter.format.map(BookFormat::as_str))
            .fetch_one(&mut **tx)
            .await?;

        count_from_i64(count)
    }

    pub(crate) async fn get_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(GET_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: &NewBook,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(CREATE_BOOK_SQL)
            .bind(book.uuid.into_uuid())
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(&book.description)
            .bind(book.price)
            .bind(quantity_to_i32(book.stock_quantity)?)
            .bind(book.genre.as_str())
            .bind(book.format.as_str())
            .bind(book.publication_date.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        update: &BookUpdate,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(UPDATE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(update.price)
            .bind(quantity_to_i32(update.stock_quantity)?)
            .bind(update.on_sale)
            .bind(update.sale_price)
            .bind(update.sale_start.map(SqlxTimestamp::from))
            .bind(update.sale_end.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }
}

/// Convert a quantity to the `INTEGER` the schema stores.
pub(crate) fn quantity_to_i32(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// Decode an `INTEGER` quantity column, rejecting negatives.
pub(crate) fn try_get_quantity(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let quantity: i32 = row.try_get(column)?;

    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Decode a text column through its `FromStr` impl.
fn try_get_parsed<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|e: T::Err| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Decode the standard book column set, optionally under a column prefix.
pub(crate) fn book_from_row(row: &PgRow, prefix: &str) -> sqlx::Result<BookRecord> {
    let col = |name: &str| format!("{prefix}{name}");

    Ok(BookRecord {
        uuid: BookUuid::from_uuid(row.try_get(col("uuid").as_str())?),
        title: row.try_get(col("title").as_str())?,
        author: row.try_get(col("author").as_str())?,
        isbn: row.try_get(col("isbn").as_str())?,
        description: row.try_get(col("description").as_str())?,
        price: row.try_get(col("price").as_str())?,
        stock_quantity: try_get_quantity(row, &col("stock_quantity"))?,
        on_sale: row.try_get(col("on_sale").as_str())?,
        sale_price: row.try_get(col("sale_price").as_str())?,
        sale_start: row
            .try_get::<Option<SqlxTimestamp>, _>(col("sale_start").as_str())?
            .map(SqlxTimestamp::to_jiff),
        sale_end: row
            .try_get::<Option<SqlxTimestamp>, _>(col("sale_end").as_str())?
            .map(SqlxTimestamp::to_jiff),
        genre: try_get_parsed(row, &col("genre"))?,
        format: try_get_parsed(row, &col("format"))?,
        publication_date: row
            .try_get::<Option<SqlxTimestamp>, _>(col("publication_date").as_str())?
            .map(SqlxTimestamp::to_jiff),
        created_at: row
            .try_get::<SqlxTimestamp, _>(col("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(col("updated_at").as_str())?
            .to_jiff(),
    })
}

impl<'r> FromRow<'r, PgRow> for BookRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        book_from_row(row, "")
    }
}
