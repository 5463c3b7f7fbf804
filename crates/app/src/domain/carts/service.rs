//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tiffin::{cart::aggregate, policy::OrderPolicy};
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartAggregation, CartItemRecord, CartItemUuid, CartLineRecord},
            repository::SqliteCartItemsRepository,
        },
        users::{SqliteUsersRepository, records::UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    policy: OrderPolicy,
    items: SqliteCartItemsRepository,
    users: SqliteUsersRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db, policy: OrderPolicy) -> Self {
        Self {
            db,
            policy,
            items: SqliteCartItemsRepository::new(),
            users: SqliteUsersRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            menu_item_uuid = %item.item_uuid,
            quantity = item.quantity
        ),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let stored = self
            .items
            .add_cart_item(&mut tx, user, item, Timestamp::now())
            .await?;

        tx.commit().await?;

        debug!(
            cart_item_uuid = %stored.uuid,
            quantity = stored.quantity,
            "added item to cart"
        );

        Ok(stored)
    }

    #[tracing::instrument(
        name = "carts.service.update_quantity",
        skip(self),
        fields(user_uuid = %user, cart_item_uuid = %cart_item),
        err
    )]
    async fn update_quantity(
        &self,
        user: UserUuid,
        cart_item: CartItemUuid,
        quantity: u32,
    ) -> Result<Option<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = if quantity == 0 {
            let rows_affected = self.items.delete_cart_item(&mut tx, user, cart_item).await?;

            if rows_affected == 0 {
                return Err(CartsServiceError::NotFound);
            }

            None
        } else {
            Some(
                self.items
                    .update_quantity(&mut tx, user, cart_item, quantity, Timestamp::now())
                    .await?,
            )
        };

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        cart_item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.items.delete_cart_item(&mut tx, user, cart_item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_cart_lines(
        &self,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.items.get_cart_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(lines)
    }

    #[tracing::instrument(
        name = "carts.service.aggregate_cart",
        skip(self),
        fields(
            user_uuid = %user,
            line_count = tracing::field::Empty,
            group_count = tracing::field::Empty
        ),
        err
    )]
    async fn aggregate_cart(&self, user: UserUuid) -> Result<CartAggregation, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.users.user_exists(&mut tx, user).await? {
            return Err(CartsServiceError::UserNotFound);
        }

        let lines = self.items.get_cart_lines(&mut tx, user).await?;

        tx.commit().await?;

        let span = tracing::Span::current();

        span.record("line_count", lines.len());

        let aggregation = aggregate(
            lines.iter().map(CartLineRecord::to_cart_line),
            self.policy.shipping_cost,
        )?;

        if let CartAggregation::Groups(groups) = &aggregation {
            span.record("group_count", groups.groups().len());

            info!(grand_total = groups.grand_total(), "aggregated cart");
        }

        Ok(aggregation)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a menu item to the user's cart, or increase its quantity when present.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Set a cart line's quantity. Zero removes the line and returns `None`.
    async fn update_quantity(
        &self,
        user: UserUuid,
        cart_item: CartItemUuid,
        quantity: u32,
    ) -> Result<Option<CartItemRecord>, CartsServiceError>;

    /// Remove a line from the user's cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        cart_item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// The user's cart lines with item and restaurant names, in the order added.
    async fn get_cart_lines(
        &self,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, CartsServiceError>;

    /// Group the user's cart by restaurant with per-group shipping. Read-only.
    async fn aggregate_cart(&self, user: UserUuid) -> Result<CartAggregation, CartsServiceError>;
}
