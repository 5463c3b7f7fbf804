//! Ratings Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::{
    database::{timestamp_param, try_get_timestamp},
    domain::{
        restaurants::{
            data::NewRating,
            records::{RatingRecord, RatingUuid, RestaurantUuid},
        },
        users::records::UserUuid,
    },
};

const UPSERT_RATING_SQL: &str = include_str!("../sql/upsert_rating.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteRatingsRepository;

impl SqliteRatingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the rating, or replace the value when the user already rated.
    pub(crate) async fn upsert_rating(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        rating: NewRating,
        point_in_time: Timestamp,
    ) -> Result<RatingRecord, sqlx::Error> {
        query_as::<Sqlite, RatingRecord>(UPSERT_RATING_SQL)
            .bind(rating.uuid.into_uuid())
            .bind(rating.restaurant_uuid.into_uuid())
            .bind(rating.user_uuid.into_uuid())
            .bind(i64::from(rating.value))
            .bind(rating.review)
            .bind(timestamp_param(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for RatingRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let value_i64: i64 = row.try_get("value")?;

        let value = u8::try_from(value_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "value".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: RatingUuid::from_uuid(row.try_get("uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            value,
            review: row.try_get("review")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
