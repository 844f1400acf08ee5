//! Place Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_app::domain::{orders::records::PlacedOrder, pricing::DiscountTiers};

use crate::{
    extensions::*,
    observability::{OrderEvent, observe_order},
    orders::errors::into_status_error,
    state::State,
};

/// Which discount tiers fired at checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiscountsAppliedResponse {
    /// 5% off for five or more units
    pub base5_percent: bool,

    /// A further 10% off for customers with ten or more collected orders
    pub extra10_percent: bool,
}

impl From<DiscountTiers> for DiscountsAppliedResponse {
    fn from(tiers: DiscountTiers) -> Self {
        Self {
            base5_percent: tiers.bulk,
            extra10_percent: tiers.loyalty,
        }
    }
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderPlacedResponse {
    pub order_uuid: Uuid,

    /// Code to read out at the counter
    pub claim_code: String,

    pub subtotal: String,
    pub discount: String,
    pub total: String,

    pub discounts_applied: DiscountsAppliedResponse,
}

impl From<PlacedOrder> for OrderPlacedResponse {
    fn from(order: PlacedOrder) -> Self {
        Self {
            order_uuid: order.order_uuid.into_uuid(),
            claim_code: order.claim_code,
            subtotal: order.subtotal.to_string(),
            discount: order.discount.to_string(),
            total: order.total.to_string(),
            discounts_applied: order.discounts_applied.into(),
        }
    }
}

/// Place Order Handler
///
/// Checks out the caller's cart: prices are frozen, stock is reserved and the cart
/// is emptied. The order waits for pickup under the returned claim code.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty or stock is insufficient"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(name = "orders.place", skip(depot, res), fields(user_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(identity.user_uuid));

    let placed = state
        .app
        .orders
        .place_order(identity.user_uuid, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    observe_order(OrderEvent::Placed);

    tracing::info!(order_uuid = %placed.order_uuid, total = %placed.total, "placed order");

    res.add_header(LOCATION, format!("/member/orders/{}", placed.order_uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(placed.into()))
}
