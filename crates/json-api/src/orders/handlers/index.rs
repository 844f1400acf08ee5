//! Order History Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bookstore_app::domain::orders::{data::OrderFilter, status::OrderStatus};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, handlers::OrderResponse},
    state::State,
};

/// Orders Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersPageResponse {
    #[serde(flatten)]
    pub meta: PageMeta,

    pub items: Vec<OrderResponse>,
}

/// Order History Handler
///
/// The caller's orders, newest first, optionally filtered by `status`.
#[endpoint(
    tags("orders"),
    summary = "Order History",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let filter = OrderFilter {
        status: status
            .into_inner()
            .map(|status| status.parse::<OrderStatus>())
            .transpose()
            .or_400("invalid order status")?,
    };

    let orders = state
        .app
        .orders
        .list_orders(identity.user_uuid, filter, page_request(page, page_size)?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersPageResponse {
        meta: PageMeta::from(&orders),
        items: orders.items.into_iter().map(Into::into).collect(),
    }))
}
