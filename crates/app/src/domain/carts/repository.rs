//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    carts::records::{CartItemRecord, CartLineRecord},
    catalog::{records::BookUuid, try_get_quantity},
    pricing::PriceTerms,
    users::records::UserUuid,
};

const GET_CART_LINES_SQL: &str = include_str!("sql/get_cart_lines.sql");
const GET_BOOK_STOCK_SQL: &str = include_str!("sql/get_book_stock.sql");
const INCREMENT_CART_ITEM_SQL: &str = include_str!("sql/increment_cart_item.sql");
const DECREMENT_CART_ITEM_SQL: &str = include_str!("sql/decrement_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Current stock of a book, share-locked for the rest of the transaction.
    pub(crate) async fn get_book_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<u32, sqlx::Error> {
        let stock: i32 = query_scalar(GET_BOOK_STOCK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u32::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock_quantity".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn increment_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(INCREMENT_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Take one unit off a line holding more than one. `None` means the line holds a
    /// single unit or does not exist.
    pub(crate) async fn decrement_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(DECREMENT_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(book.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            book_uuid: BookUuid::from_uuid(row.try_get("book_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            book_uuid: BookUuid::from_uuid(row.try_get("book_uuid")?),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            quantity: try_get_quantity(row, "quantity")?,
            stock_quantity: try_get_quantity(row, "stock_quantity")?,
            price_terms: PriceTerms {
                price: row.try_get("price")?,
                on_sale: row.try_get("on_sale")?,
                sale_price: row.try_get("sale_price")?,
                sale_start: row
                    .try_get::<Option<SqlxTimestamp>, _>("sale_start")?
                    .map(SqlxTimestamp::to_jiff),
                sale_end: row
                    .try_get::<Option<SqlxTimestamp>, _>("sale_end")?
                    .map(SqlxTimestamp::to_jiff),
            },
        })
    }
}
