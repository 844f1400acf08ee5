//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            records::{Cart, CartItemRecord, CartLine},
            repository::PgCartsRepository,
        },
        catalog::records::BookUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(
        &self,
        user: UserUuid,
        point_in_time: Timestamp,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.repository.get_cart_lines(&mut tx, user).await?;

        tx.commit().await?;

        let lines = lines
            .into_iter()
            .map(|line| CartLine::priced(line, point_in_time))
            .collect();

        Ok(Cart::new(user, lines))
    }

    async fn add_item(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let stock = self.repository.get_book_stock(&mut tx, book).await?;

        let item = self.repository.increment_item(&mut tx, user, book).await?;

        if item.quantity > stock {
            debug!(%user, %book, quantity = item.quantity, stock, "cart quantity exceeds stock");

            return Err(CartsServiceError::OutOfStock(book));
        }

        tx.commit().await?;

        Ok(item)
    }

    async fn decrease_item(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<Option<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if let Some(item) = self.repository.decrement_item(&mut tx, user, book).await? {
            tx.commit().await?;

            return Ok(Some(item));
        }

        let rows_affected = self.repository.delete_item(&mut tx, user, book).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(None)
    }

    async fn remove_item(&self, user: UserUuid, book: BookUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_item(&mut tx, user, book).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.clear_cart(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::EmptyCart);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a user's cart, priced at `point_in_time`.
    async fn get_cart(
        &self,
        user: UserUuid,
        point_in_time: Timestamp,
    ) -> Result<Cart, CartsServiceError>;

    /// Add one unit of a book to the cart.
    async fn add_item(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Take one unit of a book out of the cart. Returns `None` once the line is gone.
    async fn decrease_item(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<Option<CartItemRecord>, CartsServiceError>;

    /// Drop a book from the cart entirely.
    async fn remove_item(&self, user: UserUuid, book: BookUuid) -> Result<(), CartsServiceError>;

    /// Empty the cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
