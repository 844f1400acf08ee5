//! Stock Ledger
//!
//! Reserves and releases book stock inside the caller's transaction.

use sqlx::{Postgres, Transaction, query};

use crate::domain::{
    catalog::{quantity_to_i32, records::BookUuid},
    orders::errors::OrdersServiceError,
};

const RESERVE_STOCK_SQL: &str = include_str!("sql/reserve_stock.sql");
const RELEASE_STOCK_SQL: &str = include_str!("sql/release_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct StockLedger;

impl StockLedger {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Take `quantity` units out of stock.
    ///
    /// The decrement only applies when enough stock remains, so stock never goes
    /// negative even if two checkouts race past their reads.
    pub(crate) async fn reserve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        quantity: u32,
    ) -> Result<(), OrdersServiceError> {
        let rows_affected = query(RESERVE_STOCK_SQL)
            .bind(book.into_uuid())
            .bind(quantity_to_i32(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(OrdersServiceError::InsufficientStock(book));
        }

        Ok(())
    }

    /// Return `quantity` units to stock.
    pub(crate) async fn release(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        quantity: u32,
    ) -> Result<(), OrdersServiceError> {
        query(RELEASE_STOCK_SQL)
            .bind(book.into_uuid())
            .bind(quantity_to_i32(quantity)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
