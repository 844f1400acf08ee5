//! Process Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_app::domain::orders::{claim_codes::ClaimCode, records::OrderRecord};

use crate::{
    extensions::*,
    observability::{OrderEvent, observe_order},
    orders::errors::into_status_error,
    state::State,
};

/// Order Processed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderProcessedResponse {
    pub order_uuid: Uuid,
    pub status: String,
    pub total: String,
}

impl From<OrderRecord> for OrderProcessedResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            order_uuid: order.uuid.into_uuid(),
            status: order.status.to_string(),
            total: order.total.to_string(),
        }
    }
}

/// Process Order Handler
///
/// Marks the pending order holding `claim_code` as collected. Codes are matched
/// case-insensitively and surrounding whitespace is ignored.
#[endpoint(
    tags("staff"),
    summary = "Process Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order completed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing claim code or order is not pending"),
        (status_code = StatusCode::NOT_FOUND, description = "No order with this claim code"),
        (status_code = StatusCode::FORBIDDEN, description = "Staff role required"),
    ),
)]
#[tracing::instrument(name = "orders.process", skip(claim_code, depot), fields(order_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(
    claim_code: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrderProcessedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let claim_code = claim_code
        .into_inner()
        .map(|code| ClaimCode::normalize(&code))
        .filter(|code| !code.as_str().is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("\"claim_code\" is required"))?;

    let order = state
        .app
        .orders
        .complete_order(claim_code)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("order_uuid", tracing::field::display(order.uuid));

    observe_order(OrderEvent::Completed);

    tracing::info!(order_uuid = %order.uuid, "completed order");

    Ok(Json(order.into()))
}
