//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Instrument, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::PgCartsRepository,
        orders::{
            builder::OrderBuilder,
            claim_codes::{ClaimCode, MAX_CLAIM_CODE_ATTEMPTS},
            data::OrderFilter,
            errors::OrdersServiceError,
            records::{BestSellerRecord, OrderRecord, OrderUuid, PlacedOrder},
            repositories::{PgOrderLinesRepository, PgOrdersRepository},
            stock::StockLedger,
        },
        pagination::{Page, PageRequest},
        users::{PgUsersRepository, records::UserUuid},
    },
    notifications::{Notifier, OrderConfirmation},
};

/// Units a book must have sold across collected orders to rank as a best seller.
pub const BEST_SELLER_MIN_SOLD: u32 = 5;

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    lines: PgOrderLinesRepository,
    carts: PgCartsRepository,
    users: PgUsersRepository,
    stock: StockLedger,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            lines: PgOrderLinesRepository::new(),
            carts: PgCartsRepository::new(),
            users: PgUsersRepository::new(),
            stock: StockLedger::new(),
            notifier,
        }
    }

    /// Find a claim code no existing order uses.
    async fn allocate_claim_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<ClaimCode, OrdersServiceError> {
        for attempt in 1..=MAX_CLAIM_CODE_ATTEMPTS {
            let code = ClaimCode::generate();

            if !self.orders.claim_code_exists(tx, &code).await? {
                return Ok(code);
            }

            warn!(attempt, "claim code collision");
        }

        Err(OrdersServiceError::ClaimCodeExhausted)
    }

    /// Send the confirmation in the background. Failures are logged and never reach
    /// the caller.
    fn dispatch_confirmation(&self, order: OrderUuid, confirmation: OrderConfirmation) {
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(
            async move {
                if let Err(error) = notifier.send_order_confirmation(confirmation).await {
                    warn!(%order, error = %error, "failed to send order confirmation");
                }
            }
            .in_current_span(),
        );
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        user: UserUuid,
        point_in_time: Timestamp,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self.users.get_user(&mut tx, user).await?;

        // Cart rows are locked with the books so a concurrent checkout of the same
        // cart resumes to find it empty.
        let cart = self.orders.lock_cart_books(&mut tx, user).await?;

        let completed_orders = self.users.completed_order_count(&mut tx, user).await?;

        let mut builder = OrderBuilder::new(user, point_in_time);

        for line in cart {
            builder.add_line(line.book, line.quantity)?;
        }

        let draft = builder.build(completed_orders)?;

        let code = self.allocate_claim_code(&mut tx).await?;

        let order = self.orders.create_order(&mut tx, &draft, &code).await?;

        self.lines
            .create_lines(&mut tx, order.uuid, draft.lines())
            .await?;

        for line in draft.lines() {
            self.stock
                .reserve(&mut tx, line.book.uuid, line.quantity)
                .await?;
        }

        self.carts.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        info!(
            order = %order.uuid,
            %user,
            total = %order.total,
            bulk = draft.tiers().bulk,
            loyalty = draft.tiers().loyalty,
            "order placed"
        );

        self.dispatch_confirmation(
            order.uuid,
            OrderConfirmation {
                recipient_email: customer.email,
                recipient_name: customer.name,
                claim_code: order.claim_code.clone(),
                total: order.total,
                titles: draft.titles(),
            },
        );

        Ok(PlacedOrder {
            order_uuid: order.uuid,
            claim_code: order.claim_code,
            subtotal: order.subtotal,
            discount: order.discount,
            total: order.total,
            discounts_applied: draft.tiers(),
        })
    }

    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders.lock_order(&mut tx, user, order).await?;

        let next = current.status.cancel()?;

        let lines = self
            .lines
            .get_lines(&mut tx, &[order])
            .await?
            .remove(&order)
            .unwrap_or_default();

        for line in &lines {
            self.stock
                .release(&mut tx, line.book_uuid, line.quantity)
                .await?;
        }

        let mut cancelled = self.orders.update_status(&mut tx, order, next).await?;

        tx.commit().await?;

        info!(%order, %user, "order cancelled");

        cancelled.lines = lines;

        Ok(cancelled)
    }

    async fn complete_order(&self, claim_code: ClaimCode) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders
            .lock_order_by_claim_code(&mut tx, &claim_code)
            .await?;

        let next = current.status.complete()?;

        let mut completed = self
            .orders
            .update_status(&mut tx, current.uuid, next)
            .await?;

        let lines = self
            .lines
            .get_lines(&mut tx, &[completed.uuid])
            .await?
            .remove(&completed.uuid)
            .unwrap_or_default();

        tx.commit().await?;

        info!(order = %completed.uuid, %claim_code, "order completed");

        completed.lines = lines;

        Ok(completed)
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let total_count = self.orders.count_orders(&mut tx, user, filter).await?;

        let mut orders = self
            .orders
            .list_orders(&mut tx, user, filter, page)
            .await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut lines = self.lines.get_lines(&mut tx, &uuids).await?;

        tx.commit().await?;

        for order in &mut orders {
            order.lines = lines.remove(&order.uuid).unwrap_or_default();
        }

        Ok(Page::new(orders, page, total_count))
    }

    async fn best_sellers(
        &self,
        page: PageRequest,
    ) -> Result<Page<BestSellerRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let total_count = self
            .orders
            .count_best_sellers(&mut tx, BEST_SELLER_MIN_SOLD)
            .await?;

        let best_sellers = self
            .orders
            .best_sellers(&mut tx, BEST_SELLER_MIN_SOLD, page)
            .await?;

        tx.commit().await?;

        Ok(Page::new(best_sellers, page, total_count))
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into a pending order.
    ///
    /// Prices are frozen at `point_in_time`, stock is reserved and the cart is
    /// emptied in one transaction. A confirmation is sent after commit.
    async fn place_order(
        &self,
        user: UserUuid,
        point_in_time: Timestamp,
    ) -> Result<PlacedOrder, OrdersServiceError>;

    /// Cancel one of the user's pending orders and return its stock.
    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Mark the pending order holding `claim_code` as collected.
    async fn complete_order(&self, claim_code: ClaimCode) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_orders(
        &self,
        user: UserUuid,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// Books ranked by units sold across collected orders.
    async fn best_sellers(
        &self,
        page: PageRequest,
    ) -> Result<Page<BestSellerRecord>, OrdersServiceError>;
}
