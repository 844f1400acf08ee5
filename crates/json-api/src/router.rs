//! App Router

use salvo::Router;

use crate::{
    auth::{
        self,
        roles::{require_admin, require_staff},
    },
    books, carts, healthcheck,
    observability::metrics_handler,
    orders,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("books")
                .get(books::index::handler)
                .push(Router::with_path("best-sellers").get(books::best_sellers::handler))
                .push(Router::with_path("{book}").get(books::get::handler)),
        )
        .push(
            Router::with_path("member")
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::clear::handler)
                        .push(
                            Router::with_path("{book}")
                                .post(carts::add::handler)
                                .delete(carts::remove::handler)
                                .push(Router::with_path("decrease").put(carts::decrease::handler)),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("{order}").delete(orders::cancel::handler)),
                ),
        )
        .push(
            Router::with_path("staff")
                .hoop(auth::middleware::handler)
                .hoop(require_staff)
                .push(Router::with_path("orders/process").post(orders::process::handler)),
        )
        .push(
            Router::with_path("admin")
                .hoop(auth::middleware::handler)
                .hoop(require_admin)
                .push(
                    Router::with_path("books")
                        .post(books::create::handler)
                        .push(Router::with_path("{book}").put(books::update::handler)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use salvo::{
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use bookstore_app::{
        auth::{AuthServiceError, Identity, MockAuthService},
        domain::{
            catalog::{MockCatalogService, records::BookUuid},
            orders::MockOrdersService,
            pagination::Page,
            users::records::Role,
        },
    };

    use crate::{
        books::best_sellers::BestSellersPageResponse,
        test_helpers::{Mocks, TEST_USER_UUID, make_book},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    fn auth_as(role: Role) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().returning(move |token| {
            if token == "valid" {
                Ok(Identity {
                    user_uuid: TEST_USER_UUID,
                    role,
                })
            } else {
                Err(AuthServiceError::NotFound)
            }
        });

        auth
    }

    #[tokio::test]
    async fn best_sellers_is_not_shadowed_by_book_lookup() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_best_sellers()
            .once()
            .return_once(|page| Ok(Page::new(vec![], page, 0)));

        let mut catalog = MockCatalogService::new();

        catalog.expect_get_book().never();

        let response: BestSellersPageResponse = TestClient::get("http://example.com/books/best-sellers")
            .send(&make_service(Mocks {
                orders,
                catalog,
                ..Mocks::default()
            }))
            .await
            .take_json()
            .await?;

        assert_eq!(response.meta.total_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn catalog_is_public() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_book()
            .once()
            .return_once(|uuid| Ok(make_book(uuid, dec!(9.99))));

        let res = TestClient::get(format!("http://example.com/books/{}", BookUuid::new()))
            .send(&make_service(Mocks::catalog(catalog)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn member_routes_require_a_token() -> TestResult {
        for (method, url) in [
            ("GET", "http://example.com/member/cart"),
            ("POST", "http://example.com/member/orders"),
            ("GET", "http://example.com/member/orders"),
        ] {
            let request = match method {
                "POST" => TestClient::post(url),
                _ => TestClient::get(url),
            };

            let res = request.send(&make_service(Mocks::default())).await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED), "{method} {url}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn members_cannot_process_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_complete_order().never();

        let res = TestClient::post("http://example.com/staff/orders/process?claim_code=AB12CD34")
            .add_header(AUTHORIZATION, "Bearer valid", true)
            .send(&make_service(Mocks {
                auth: auth_as(Role::Member),
                orders,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn staff_cannot_manage_books() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_book().never();

        let res = TestClient::post("http://example.com/admin/books")
            .add_header(AUTHORIZATION, "Bearer valid", true)
            .json(&serde_json::json!({
                "title": "Dune",
                "author": "Frank Herbert",
                "isbn": "9780441013593",
                "price": "12.99",
                "stockQuantity": 5,
            }))
            .send(&make_service(Mocks {
                auth: auth_as(Role::Staff),
                catalog,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() -> TestResult {
        let res = TestClient::get("http://example.com/member/cart")
            .add_header(AUTHORIZATION, "Bearer forged", true)
            .send(&make_service(Mocks {
                auth: auth_as(Role::Member),
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
