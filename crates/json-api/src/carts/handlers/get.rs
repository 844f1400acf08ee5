//! Get Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookstore_app::domain::carts::records::{Cart, CartLine};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The lines in the cart
    pub items: Vec<CartLineResponse>,

    /// Sum of line totals at current prices, before order discounts
    pub subtotal: String,

    /// Number of units across all lines
    pub total_quantity: u32,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            subtotal: cart.subtotal.to_string(),
            total_quantity: cart.total_quantity,
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    pub book_uuid: Uuid,
    pub title: String,
    pub author: String,
    pub quantity: u32,

    /// Units the store has on hand
    pub stock_quantity: u32,

    /// Base catalog price
    pub price: String,

    /// Price checkout would charge right now
    pub effective_price: String,

    pub line_total: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            book_uuid: line.book_uuid.into_uuid(),
            title: line.title,
            author: line.author,
            quantity: line.quantity,
            stock_quantity: line.stock_quantity,
            price: line.price.to_string(),
            effective_price: line.effective_price.to_string(),
            line_total: line.line_total.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart priced at the current time.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(identity.user_uuid, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bookstore_app::domain::{
        carts::MockCartsService, catalog::records::BookUuid, users::records::Role,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, public_service, service_as};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service_as(
            Role::Member,
            Mocks::carts(carts),
            Router::with_path("member/cart").get(handler),
        )
    }

    fn make_line(price: Decimal, effective_price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            book_uuid: BookUuid::new(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            quantity,
            stock_quantity: 10,
            price,
            effective_price,
            line_total: effective_price * Decimal::from(quantity),
        }
    }

    #[tokio::test]
    async fn test_get_cart_returns_priced_lines() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|user, _| *user == TEST_USER_UUID)
            .return_once(|user, _| {
                Ok(Cart::new(
                    user,
                    vec![
                        make_line(dec!(10.00), dec!(8.00), 3),
                        make_line(dec!(20.00), dec!(20.00), 2),
                    ],
                ))
            });

        let response: CartResponse = TestClient::get("http://example.com/member/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(response.items.len(), 2);
        assert_eq!(response.subtotal, "64.00");
        assert_eq!(response.total_quantity, 5);

        let first = response.items.first().ok_or("missing line")?;

        assert_eq!(first.price, "10.00");
        assert_eq!(first.effective_price, "8.00");
        assert_eq!(first.line_total, "24.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_requires_identity() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/member/cart")
            .send(&public_service(
                Mocks::carts(carts),
                Router::with_path("member/cart").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
