//! Orders Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};
use tiffin::status::OrderStatus;

use crate::{
    database::{amount_param, timestamp_param, try_get_amount, try_get_count, try_get_timestamp},
    domain::{
        orders::{
            data::{NewOrder, OrderFilter},
            records::{
                DELIVERY_ORDER_TYPE, OrderRecord, OrderSummary, OrderUuid, RestaurantOrderStats,
            },
        },
        restaurants::records::RestaurantUuid,
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("../sql/list_user_orders.sql");
const LIST_RESTAURANT_ORDERS_SQL: &str = include_str!("../sql/list_restaurant_orders.sql");
const RESTAURANT_ORDER_STATS_SQL: &str = include_str!("../sql/restaurant_order_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a `pending` delivery order.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: NewOrder,
        point_in_time: Timestamp,
    ) -> Result<OrderRecord, sqlx::Error> {
        let total_amount = amount_param(order.total_amount, "total_amount")?;
        let shipping_cost = amount_param(order.shipping_cost, "shipping_cost")?;

        query_as::<Sqlite, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(order.restaurant_uuid.into_uuid())
            .bind(total_amount)
            .bind(shipping_cost)
            .bind(OrderStatus::Pending.as_str())
            .bind(DELIVERY_ORDER_TYPE)
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
    ) -> Result<OrderSummary, sqlx::Error> {
        query_as::<Sqlite, OrderSummary>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
        status: OrderStatus,
        point_in_time: Timestamp,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Sqlite, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<Vec<OrderSummary>, sqlx::Error> {
        query_as::<Sqlite, OrderSummary>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurant_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: RestaurantUuid,
        filter: OrderFilter,
    ) -> Result<Vec<OrderSummary>, sqlx::Error> {
        query_as::<Sqlite, OrderSummary>(LIST_RESTAURANT_ORDERS_SQL)
            .bind(restaurant.into_uuid())
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(filter.placed_since.map(timestamp_param))
            .bind(filter.placed_before.map(timestamp_param))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn restaurant_order_stats(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: RestaurantUuid,
        revenue_since: Timestamp,
    ) -> Result<RestaurantOrderStats, sqlx::Error> {
        query_as::<Sqlite, RestaurantOrderStats>(RESTAURANT_ORDER_STATS_SQL)
            .bind(restaurant.into_uuid())
            .bind(timestamp_param(revenue_since))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            total_amount: try_get_amount(row, "total_amount")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            status,
            order_type: row.try_get("order_type")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderSummary {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            order: OrderRecord::from_row(row)?,
            restaurant_name: row.try_get("restaurant_name")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for RestaurantOrderStats {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_orders: u64::from(try_get_count(row, "total_orders")?),
            pending_orders: u64::from(try_get_count(row, "pending_orders")?),
            delivered_orders: u64::from(try_get_count(row, "delivered_orders")?),
            revenue: try_get_amount(row, "revenue")?,
        })
    }
}
