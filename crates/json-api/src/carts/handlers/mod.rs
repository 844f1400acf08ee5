//! Cart Handlers

pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod decrease;
pub(crate) mod get;
pub(crate) mod remove;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_app::domain::carts::records::CartItemRecord;

/// Cart Item Response
///
/// A quantity of zero means the line has been removed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub book_uuid: Uuid,
    pub quantity: u32,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            book_uuid: item.book_uuid.into_uuid(),
            quantity: item.quantity,
        }
    }
}
