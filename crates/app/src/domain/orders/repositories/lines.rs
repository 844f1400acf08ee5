//! Order Lines Repository

use std::collections::HashMap;

use sqlx::{Postgres, Row, Transaction, query};
use uuid::Uuid;

use crate::domain::{
    catalog::{quantity_to_i32, records::BookUuid, try_get_quantity},
    orders::{
        builder::DraftLine,
        records::{OrderLineRecord, OrderUuid},
    },
};

const CREATE_ORDER_LINE_SQL: &str = include_str!("../sql/create_order_line.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("../sql/get_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderLinesRepository;

impl PgOrderLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Write the draft lines in order; `position` preserves that order on read.
    pub(crate) async fn create_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[DraftLine],
    ) -> Result<(), sqlx::Error> {
        for (position, line) in lines.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            query(CREATE_ORDER_LINE_SQL)
                .bind(order.into_uuid())
                .bind(position)
                .bind(line.book.uuid.into_uuid())
                .bind(&line.book.title)
                .bind(quantity_to_i32(line.quantity)?)
                .bind(line.price_at_purchase)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    /// Lines for each of `orders`, keyed by order.
    pub(crate) async fn get_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<HashMap<OrderUuid, Vec<OrderLineRecord>>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        let rows = query(GET_ORDER_LINES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut lines: HashMap<OrderUuid, Vec<OrderLineRecord>> = HashMap::new();

        for row in rows {
            let order = OrderUuid::from_uuid(row.try_get("order_uuid")?);

            lines.entry(order).or_default().push(OrderLineRecord {
                book_uuid: BookUuid::from_uuid(row.try_get("book_uuid")?),
                title: row.try_get("title")?,
                quantity: try_get_quantity(&row, "quantity")?,
                price_at_purchase: row.try_get("price_at_purchase")?,
            });
        }

        Ok(lines)
    }
}
