//! Restaurant Records

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Restaurant UUID
pub type RestaurantUuid = TypedUuid<RestaurantRecord>;

/// Restaurant Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantRecord {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub rating_sum: u32,
    pub ratings_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RestaurantRecord {
    /// Mean customer rating, `None` until someone rates the restaurant.
    pub fn average_rating(&self) -> Option<f64> {
        (self.ratings_count > 0)
            .then(|| f64::from(self.rating_sum) / f64::from(self.ratings_count))
    }
}

/// Menu Category UUID
pub type MenuCategoryUuid = TypedUuid<MenuCategoryRecord>;

/// Menu Category Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCategoryRecord {
    pub uuid: MenuCategoryUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub name: String,
    pub created_at: Timestamp,
}

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItemRecord>;

/// Menu Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemRecord {
    pub uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub category_uuid: Option<MenuCategoryUuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub created_at: Timestamp,
}

/// Rating UUID
pub type RatingUuid = TypedUuid<RatingRecord>;

/// Rating Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRecord {
    pub uuid: RatingUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub user_uuid: UserUuid,
    pub value: u8,
    pub review: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
