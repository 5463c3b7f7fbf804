//! Cart Items Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    database::{timestamp_param, try_get_amount, try_get_count, try_get_timestamp},
    domain::{
        carts::{
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid, CartLineRecord},
        },
        restaurants::records::{MenuItemUuid, RestaurantUuid},
        users::records::UserUuid,
    },
};

const ADD_CART_ITEM_SQL: &str = include_str!("sql/add_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const GET_CART_LINES_SQL: &str = include_str!("sql/get_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartItemsRepository;

impl SqliteCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Upsert a cart item. Fails with `RowNotFound` when the menu item is unknown.
    pub(crate) async fn add_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        item: NewCartItem,
        point_in_time: Timestamp,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Sqlite, CartItemRecord>(ADD_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(item.item_uuid.into_uuid())
            .bind(i64::from(item.quantity))
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        cart_item: CartItemUuid,
        quantity: u32,
        point_in_time: Timestamp,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Sqlite, CartItemRecord>(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(cart_item.into_uuid())
            .bind(user.into_uuid())
            .bind(i64::from(quantity))
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        cart_item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(cart_item.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete every line in the user's cart, returning how many were removed.
    #[tracing::instrument(name = "carts.repository.clear_cart", skip(self, tx), err)]
    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Cart lines priced from the current menu, in the order they were added.
    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Sqlite, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartItemRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            item_uuid: MenuItemUuid::from_uuid(row.try_get("item_uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartLineRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            cart_item_uuid: CartItemUuid::from_uuid(row.try_get("cart_item_uuid")?),
            item_uuid: MenuItemUuid::from_uuid(row.try_get("item_uuid")?),
            item_name: row.try_get("item_name")?,
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            restaurant_name: row.try_get("restaurant_name")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}
