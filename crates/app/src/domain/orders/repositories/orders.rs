//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    catalog::{
        book_from_row,
        records::{BookRecord, BookUuid},
        try_get_quantity,
    },
    orders::{
        builder::OrderDraft,
        claim_codes::ClaimCode,
        data::OrderFilter,
        records::{BestSellerRecord, OrderRecord, OrderUuid},
        status::OrderStatus,
    },
    pagination::{PageRequest, count_from_i64},
    users::records::UserUuid,
};

const LOCK_CART_BOOKS_SQL: &str = include_str!("../sql/lock_cart_books.sql");
const CLAIM_CODE_EXISTS_SQL: &str = include_str!("../sql/claim_code_exists.sql");
const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LOCK_ORDER_BY_CLAIM_CODE_SQL: &str = include_str!("../sql/lock_order_by_claim_code.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const BEST_SELLERS_SQL: &str = include_str!("../sql/best_sellers.sql");
const COUNT_BEST_SELLERS_SQL: &str = include_str!("../sql/count_best_sellers.sql");

/// A cart line with its book row, locked for the checkout.
#[derive(Debug, Clone)]
pub(crate) struct CartBook {
    pub(crate) book: BookRecord,
    pub(crate) quantity: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load the user's cart joined with its books, locking the book rows in uuid
    /// order so concurrent checkouts queue behind each other.
    pub(crate) async fn lock_cart_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartBook>, sqlx::Error> {
        query_as::<Postgres, CartBook>(LOCK_CART_BOOKS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn claim_code_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &ClaimCode,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(CLAIM_CODE_EXISTS_SQL)
            .bind(code.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        draft: &OrderDraft,
        code: &ClaimCode,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(draft.uuid().into_uuid())
            .bind(draft.user_uuid().into_uuid())
            .bind(code.as_str())
            .bind(draft.subtotal())
            .bind(draft.discount())
            .bind(draft.total())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order_by_claim_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &ClaimCode,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_BY_CLAIM_CODE_SQL)
            .bind(code.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        filter: OrderFilter,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(filter.status.map(OrderStatus::as_str))
            .fetch_one(&mut **tx)
            .await?;

        count_from_i64(count)
    }

    pub(crate) async fn best_sellers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        min_sold: u32,
        page: PageRequest,
    ) -> Result<Vec<BestSellerRecord>, sqlx::Error> {
        query_as::<Postgres, BestSellerRecord>(BEST_SELLERS_SQL)
            .bind(i64::from(min_sold))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_best_sellers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        min_sold: u32,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_BEST_SELLERS_SQL)
            .bind(i64::from(min_sold))
            .fetch_one(&mut **tx)
            .await?;

        count_from_i64(count)
    }
}

fn try_get_status(row: &PgRow) -> sqlx::Result<OrderStatus> {
    let status: String = row.try_get("status")?;

    status.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            claim_code: row.try_get("claim_code")?,
            status: try_get_status(row)?,
            subtotal: row.try_get("subtotal")?,
            discount: row.try_get("discount")?,
            total: row.try_get("total")?,
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartBook {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            book: book_from_row(row, "")?,
            quantity: try_get_quantity(row, "cart_quantity")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BestSellerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let total_sold: i64 = row.try_get("total_sold")?;

        Ok(Self {
            book_uuid: BookUuid::from_uuid(row.try_get("book_uuid")?),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            total_sold: u64::try_from(total_sold).map_err(|e| sqlx::Error::ColumnDecode {
                index: "total_sold".to_string(),
                source: Box::new(e),
            })?,
        })
    }
}
