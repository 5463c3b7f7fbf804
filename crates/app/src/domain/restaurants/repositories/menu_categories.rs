//! Menu Categories Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::{
    database::{timestamp_param, try_get_timestamp},
    domain::restaurants::{
        data::NewMenuCategory,
        records::{MenuCategoryRecord, MenuCategoryUuid, RestaurantUuid},
    },
};

const CREATE_MENU_CATEGORY_SQL: &str = include_str!("../sql/create_menu_category.sql");
const LIST_MENU_CATEGORIES_SQL: &str = include_str!("../sql/list_menu_categories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteMenuCategoriesRepository;

impl SqliteMenuCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_menu_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: NewMenuCategory,
        point_in_time: Timestamp,
    ) -> Result<MenuCategoryRecord, sqlx::Error> {
        query_as::<Sqlite, MenuCategoryRecord>(CREATE_MENU_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(category.restaurant_uuid.into_uuid())
            .bind(category.name)
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_menu_categories(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<MenuCategoryRecord>, sqlx::Error> {
        query_as::<Sqlite, MenuCategoryRecord>(LIST_MENU_CATEGORIES_SQL)
            .bind(restaurant.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for MenuCategoryRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MenuCategoryUuid::from_uuid(row.try_get("uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            name: row.try_get("name")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
