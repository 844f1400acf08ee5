//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is already empty"),
    ),
)]
#[tracing::instrument(name = "cart.clear", skip(depot), fields(user_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(identity.user_uuid));

    state
        .app
        .carts
        .clear_cart(identity.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use bookstore_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        users::records::Role,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service_as};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service_as(
            Role::Member,
            Mocks::carts(carts),
            Router::with_path("member/cart").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_clear_cart_success() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/member/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_empty_cart_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::EmptyCart));

        let res = TestClient::delete("http://example.com/member/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
