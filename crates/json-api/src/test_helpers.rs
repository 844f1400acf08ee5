//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use bookstore_app::{
    auth::{Identity, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        catalog::{
            MockCatalogService,
            classification::{BookFormat, BookGenre},
            records::{BookRecord, BookUuid},
        },
        orders::MockOrdersService,
        users::{
            MockUsersService,
            records::{Role, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Service mocks. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) catalog: MockCatalogService,
    pub(crate) carts: MockCartsService,
    pub(crate) users: MockUsersService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn catalog(catalog: MockCatalogService) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub(crate) fn carts(carts: MockCartsService) -> Self {
        Self {
            carts,
            ..Self::default()
        }
    }

    pub(crate) fn orders(orders: MockOrdersService) -> Self {
        Self {
            orders,
            ..Self::default()
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            users: Arc::new(self.users),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

struct InjectIdentity(Identity);

#[async_trait]
impl Handler for InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_identity(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// Serve `route` without an authenticated caller.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// Serve `route` as [`TEST_USER_UUID`] holding `role`.
pub(crate) fn service_as(role: Role, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectIdentity(Identity {
                user_uuid: TEST_USER_UUID,
                role,
            }))
            .push(route),
    )
}

pub(crate) fn make_book(uuid: BookUuid, price: Decimal) -> BookRecord {
    BookRecord {
        uuid,
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        isbn: "9780441013593".to_string(),
        description: String::new(),
        price,
        stock_quantity: 5,
        on_sale: false,
        sale_price: None,
        sale_start: None,
        sale_end: None,
        genre: BookGenre::Fiction,
        format: BookFormat::Paperback,
        publication_date: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
