//! Menu Items Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    database::{amount_param, timestamp_param, try_get_amount, try_get_timestamp},
    domain::restaurants::{
        data::NewMenuItem,
        records::{MenuCategoryUuid, MenuItemRecord, MenuItemUuid, RestaurantUuid},
    },
};

const CREATE_MENU_ITEM_SQL: &str = include_str!("../sql/create_menu_item.sql");
const LIST_MENU_ITEMS_SQL: &str = include_str!("../sql/list_menu_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteMenuItemsRepository;

impl SqliteMenuItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: NewMenuItem,
        point_in_time: Timestamp,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        let price = amount_param(item.price, "price")?;

        query_as::<Sqlite, MenuItemRecord>(CREATE_MENU_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.restaurant_uuid.into_uuid())
            .bind(item.category_uuid.map(MenuCategoryUuid::into_uuid))
            .bind(item.name)
            .bind(item.description)
            .bind(price)
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_menu_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: RestaurantUuid,
        category: Option<MenuCategoryUuid>,
    ) -> Result<Vec<MenuItemRecord>, sqlx::Error> {
        query_as::<Sqlite, MenuItemRecord>(LIST_MENU_ITEMS_SQL)
            .bind(restaurant.into_uuid())
            .bind(category.map(MenuCategoryUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for MenuItemRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MenuItemUuid::from_uuid(row.try_get("uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            category_uuid: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(MenuCategoryUuid::from_uuid),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
