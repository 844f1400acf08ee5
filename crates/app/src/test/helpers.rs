//! Test Helpers

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use testresult::TestResult;
use tokio::sync::mpsc;

use crate::{
    domain::{
        carts::CartsService,
        catalog::{
            CatalogService, CatalogServiceError,
            classification::{BookFormat, BookGenre},
            data::NewBook,
            records::{BookRecord, BookUuid},
        },
        orders::{OrdersService, claim_codes::ClaimCode, records::PlacedOrder},
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{Role, UserRecord, UserUuid},
        },
    },
    notifications::{NotificationError, Notifier, OrderConfirmation},
    test::TestContext,
};

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
    role: Role,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            role,
        })
        .await
}

pub(crate) async fn create_member(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    create_user(ctx, email, Role::Member).await
}

pub(crate) async fn create_book(
    ctx: &TestContext,
    title: &str,
    price: Decimal,
    stock_quantity: u32,
) -> Result<BookRecord, CatalogServiceError> {
    ctx.catalog
        .create_book(NewBook {
            uuid: BookUuid::new(),
            title: title.to_string(),
            author: "Test Author".to_string(),
            isbn: String::new(),
            description: String::new(),
            price,
            stock_quantity,
            genre: BookGenre::default(),
            format: BookFormat::default(),
            publication_date: None,
        })
        .await
}

/// Put `quantity` units of a book in the user's cart.
pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    book: BookUuid,
    quantity: u32,
) -> TestResult {
    for _ in 0..quantity {
        ctx.carts.add_item(user, book).await?;
    }

    Ok(())
}

/// Place and collect `count` single-book orders so the user reaches a loyalty tier.
pub(crate) async fn complete_orders(
    ctx: &TestContext,
    user: UserUuid,
    book: BookUuid,
    count: usize,
) -> TestResult {
    for _ in 0..count {
        add_to_cart(ctx, user, book, 1).await?;

        let placed: PlacedOrder = ctx.orders.place_order(user, jiff::Timestamp::now()).await?;

        ctx.orders
            .complete_order(ClaimCode::normalize(&placed.claim_code))
            .await?;
    }

    Ok(())
}

pub(crate) async fn stock_of(ctx: &TestContext, book: BookUuid) -> Result<u32, CatalogServiceError> {
    Ok(ctx.catalog.get_book(book).await?.stock_quantity)
}

/// Notifier that hands every confirmation to the test through a channel.
#[derive(Debug)]
pub(crate) struct RecordingNotifier {
    sender: mpsc::UnboundedSender<OrderConfirmation>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> (Self, ConfirmationInbox) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (
            Self { sender },
            ConfirmationInbox { receiver },
        )
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_order_confirmation(
        &self,
        confirmation: OrderConfirmation,
    ) -> Result<(), NotificationError> {
        let _ = self.sender.send(confirmation);

        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct ConfirmationInbox {
    receiver: mpsc::UnboundedReceiver<OrderConfirmation>,
}

impl ConfirmationInbox {
    /// Wait briefly for the next confirmation.
    pub(crate) async fn next(&mut self) -> Option<OrderConfirmation> {
        tokio::time::timeout(Duration::from_secs(5), self.receiver.recv())
            .await
            .ok()
            .flatten()
    }
}
