//! Order Handlers

pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod process;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_app::domain::orders::records::{OrderLineRecord, OrderRecord};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Code to read out at the counter
    pub claim_code: String,

    /// `pending`, `completed` or `cancelled`
    pub status: String,

    pub subtotal: String,
    pub discount: String,
    pub total: String,

    pub lines: Vec<OrderLineResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            claim_code: order.claim_code,
            status: order.status.to_string(),
            subtotal: order.subtotal.to_string(),
            discount: order.discount.to_string(),
            total: order.total.to_string(),
            lines: order.lines.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderLineResponse {
    pub book_uuid: Uuid,
    pub title: String,
    pub quantity: u32,

    /// Unit price charged at checkout
    pub price_at_purchase: String,

    pub line_total: String,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            book_uuid: line.book_uuid.into_uuid(),
            line_total: line.line_total().to_string(),
            title: line.title,
            quantity: line.quantity,
            price_at_purchase: line.price_at_purchase.to_string(),
        }
    }
}
