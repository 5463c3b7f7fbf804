//! Orders service.

use async_trait::async_trait;
use jiff::{Timestamp, Unit};
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use tiffin::{
    checkout::{CheckoutPlan, OrderConfirmation},
    payment::PaymentMethod,
    policy::OrderPolicy,
    status::OrderStatus,
};
use tracing::{Span, debug, info};

use crate::{
    database::Db,
    domain::{
        carts::{SqliteCartItemsRepository, records::CartGroup},
        orders::{
            data::{CheckoutOutcome, CheckoutReceipt, NewOrder, OrderFilter},
            errors::{CheckoutError, OrdersServiceError},
            records::{OrderRecord, OrderSummary, OrderUuid, OrderView, RestaurantOrderStats},
            repositories::{
                SqliteOrderItemsRepository, SqliteOrdersRepository, SqlitePaymentsRepository,
            },
        },
        restaurants::{SqliteRestaurantsRepository, records::RestaurantUuid},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersService {
    db: Db,
    policy: OrderPolicy,
    orders: SqliteOrdersRepository,
    items: SqliteOrderItemsRepository,
    payments: SqlitePaymentsRepository,
    cart_items: SqliteCartItemsRepository,
    restaurants: SqliteRestaurantsRepository,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db, policy: OrderPolicy) -> Self {
        Self {
            db,
            policy,
            orders: SqliteOrdersRepository::new(),
            items: SqliteOrderItemsRepository::new(),
            payments: SqlitePaymentsRepository::new(),
            cart_items: SqliteCartItemsRepository::new(),
            restaurants: SqliteRestaurantsRepository::new(),
        }
    }

    async fn load_view(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        summary: OrderSummary,
    ) -> Result<OrderView, OrdersServiceError> {
        let items = self.items.list_order_items(tx, summary.order.uuid).await?;
        let payment = self
            .payments
            .get_order_payment(tx, summary.order.uuid)
            .await?;

        let estimated_delivery_at = self.policy.delivery_deadline(summary.order.created_at)?;

        Ok(OrderView {
            summary,
            items,
            payment,
            estimated_delivery_at,
        })
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    #[tracing::instrument(
        name = "orders.service.checkout",
        skip(self, groups),
        fields(
            user_uuid = %user,
            payment_method = %payment_method,
            group_count = groups.len(),
            cleared_lines = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(
        &self,
        user: UserUuid,
        groups: Vec<CartGroup>,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let plan = CheckoutPlan::new(&groups, payment_method);

        if plan.is_empty() {
            debug!("nothing to check out");

            return Ok(CheckoutOutcome::EmptyCart);
        }

        // Orders store milliseconds; the confirmation must carry the same instant.
        let placed_at = Timestamp::now().round(Unit::Millisecond)?;
        let confirmation = OrderConfirmation::new(placed_at, &self.policy)?;

        let mut tx = self.db.begin().await?;

        // Claiming the cart first takes the write lock for the whole unit.
        let cleared_lines = self.cart_items.clear_cart(&mut tx, user).await?;

        Span::current().record("cleared_lines", cleared_lines);

        if cleared_lines == 0 {
            debug!("cart already checked out");

            return Ok(CheckoutOutcome::EmptyCart);
        }

        let mut order_uuids = Vec::with_capacity(plan.orders().len());

        for planned in plan.orders() {
            let order = self
                .orders
                .create_order(
                    &mut tx,
                    NewOrder {
                        uuid: OrderUuid::new(),
                        user_uuid: user,
                        restaurant_uuid: planned.restaurant,
                        total_amount: planned.total_amount,
                        shipping_cost: planned.shipping_cost,
                    },
                    placed_at,
                )
                .await?;

            self.items
                .create_order_items(&mut tx, order.uuid, &planned.items)
                .await?;

            self.payments
                .create_payment(
                    &mut tx,
                    order.uuid,
                    plan.payment_method(),
                    planned.transaction_uuid,
                    planned.payment_amount,
                    placed_at,
                )
                .await?;

            order_uuids.push(order.uuid);
        }

        tx.commit().await?;

        info!(
            order_count = order_uuids.len(),
            order_number = %confirmation.order_number,
            "placed orders"
        );

        Ok(CheckoutOutcome::Placed(CheckoutReceipt {
            order_uuids,
            confirmation,
        }))
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderView, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let summary = self.orders.get_order(&mut tx, order).await?;
        let view = self.load_view(&mut tx, summary).await?;

        tx.commit().await?;

        Ok(view)
    }

    #[tracing::instrument(
        name = "orders.service.track_and_advance_order",
        skip(self),
        fields(order_uuid = %order, status = tracing::field::Empty),
        err
    )]
    async fn track_and_advance_order(
        &self,
        order: OrderUuid,
        point_in_time: Timestamp,
    ) -> Result<OrderView, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut summary = self.orders.get_order(&mut tx, order).await?;

        let current = summary.order.status;

        if let Some(next) =
            current.on_inspection(summary.order.created_at, point_in_time, self.policy.delivery_window)
        {
            summary.order = self
                .orders
                .update_order_status(&mut tx, order, next, point_in_time)
                .await?;

            info!(from = %current, to = %next, "advanced order on inspection");
        }

        let view = self.load_view(&mut tx, summary).await?;

        tx.commit().await?;

        Span::current().record("status", view.order().status.as_str());

        Ok(view)
    }

    #[tracing::instrument(
        name = "orders.service.set_order_status",
        skip(self),
        fields(order_uuid = %order, status = %status),
        err
    )]
    async fn set_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .orders
            .update_order_status(&mut tx, order, status, Timestamp::now())
            .await?;

        tx.commit().await?;

        if updated.status.is_terminal() {
            info!("order closed by administrator");
        } else {
            debug!("order status set by administrator");
        }

        Ok(updated)
    }

    async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_user_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_restaurant_orders(
        &self,
        restaurant: RestaurantUuid,
        filter: OrderFilter,
    ) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.restaurants.get_restaurant(&mut tx, restaurant).await?;

        let orders = self
            .orders
            .list_restaurant_orders(&mut tx, restaurant, filter)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.restaurant_order_stats",
        skip(self),
        fields(restaurant_uuid = %restaurant),
        err
    )]
    async fn restaurant_order_stats(
        &self,
        restaurant: RestaurantUuid,
        revenue_since: Timestamp,
    ) -> Result<RestaurantOrderStats, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.restaurants.get_restaurant(&mut tx, restaurant).await?;

        let stats = self
            .orders
            .restaurant_order_stats(&mut tx, restaurant, revenue_since)
            .await?;

        tx.commit().await?;

        debug!(
            total_orders = stats.total_orders,
            revenue = stats.revenue,
            "computed restaurant order stats"
        );

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn cart groups into one order per restaurant, each with its items and a
    /// completed payment, and clear the user's cart. All or nothing.
    ///
    /// Returns [`CheckoutOutcome::EmptyCart`] when there are no groups or the cart
    /// was already emptied by a concurrent checkout.
    async fn checkout(
        &self,
        user: UserUuid,
        groups: Vec<CartGroup>,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError>;

    /// Read an order with its items and payment. Never changes the order.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderView, OrdersServiceError>;

    /// Read an order for the tracking view, advancing and persisting its status
    /// as inspection at `point_in_time` dictates.
    async fn track_and_advance_order(
        &self,
        order: OrderUuid,
        point_in_time: Timestamp,
    ) -> Result<OrderView, OrdersServiceError>;

    /// Set any status on an order.
    async fn set_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// A customer's orders, newest first.
    async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderSummary>, OrdersServiceError>;

    /// A restaurant's orders matching `filter`, newest first.
    async fn list_restaurant_orders(
        &self,
        restaurant: RestaurantUuid,
        filter: OrderFilter,
    ) -> Result<Vec<OrderSummary>, OrdersServiceError>;

    /// Order counts for a restaurant, with revenue from orders placed since
    /// `revenue_since`.
    async fn restaurant_order_stats(
        &self,
        restaurant: RestaurantUuid,
        revenue_since: Timestamp,
    ) -> Result<RestaurantOrderStats, OrdersServiceError>;
}
