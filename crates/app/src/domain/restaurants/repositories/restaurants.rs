//! Restaurants Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::{
    database::{timestamp_param, try_get_count, try_get_timestamp},
    domain::restaurants::{
        data::{NewRestaurant, RestaurantUpdate},
        records::{RestaurantRecord, RestaurantUuid},
    },
};

const CREATE_RESTAURANT_SQL: &str = include_str!("../sql/create_restaurant.sql");
const GET_RESTAURANT_SQL: &str = include_str!("../sql/get_restaurant.sql");
const LIST_RESTAURANTS_SQL: &str = include_str!("../sql/list_restaurants.sql");
const UPDATE_RESTAURANT_SQL: &str = include_str!("../sql/update_restaurant.sql");
const REFRESH_RATING_TOTALS_SQL: &str = include_str!("../sql/refresh_rating_totals.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteRestaurantsRepository;

impl SqliteRestaurantsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_restaurant(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: NewRestaurant,
        point_in_time: Timestamp,
    ) -> Result<RestaurantRecord, sqlx::Error> {
        query_as::<Sqlite, RestaurantRecord>(CREATE_RESTAURANT_SQL)
            .bind(restaurant.uuid.into_uuid())
            .bind(restaurant.name)
            .bind(restaurant.address)
            .bind(restaurant.phone_number)
            .bind(restaurant.email)
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_restaurant(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: RestaurantUuid,
    ) -> Result<RestaurantRecord, sqlx::Error> {
        query_as::<Sqlite, RestaurantRecord>(GET_RESTAURANT_SQL)
            .bind(restaurant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurants(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<RestaurantRecord>, sqlx::Error> {
        query_as::<Sqlite, RestaurantRecord>(LIST_RESTAURANTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_restaurant(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: RestaurantUuid,
        update: RestaurantUpdate,
        point_in_time: Timestamp,
    ) -> Result<RestaurantRecord, sqlx::Error> {
        query_as::<Sqlite, RestaurantRecord>(UPDATE_RESTAURANT_SQL)
            .bind(restaurant.into_uuid())
            .bind(update.name)
            .bind(update.address)
            .bind(update.phone_number)
            .bind(update.email)
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    /// Recompute the cached rating totals from the ratings table.
    pub(crate) async fn refresh_rating_totals(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        restaurant: RestaurantUuid,
        point_in_time: Timestamp,
    ) -> Result<RestaurantRecord, sqlx::Error> {
        query_as::<Sqlite, RestaurantRecord>(REFRESH_RATING_TOTALS_SQL)
            .bind(restaurant.into_uuid())
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for RestaurantRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RestaurantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            phone_number: row.try_get("phone_number")?,
            email: row.try_get("email")?,
            rating_sum: try_get_count(row, "rating_sum")?,
            ratings_count: try_get_count(row, "ratings_count")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
