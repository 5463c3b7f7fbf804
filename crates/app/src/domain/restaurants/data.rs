//! Restaurant Data

use crate::domain::{
    restaurants::records::{MenuCategoryUuid, MenuItemUuid, RatingUuid, RestaurantUuid},
    users::records::UserUuid,
};

/// New Restaurant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Restaurant Settings Update
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// New Menu Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuCategory {
    pub uuid: MenuCategoryUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub name: String,
}

/// New Menu Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub category_uuid: Option<MenuCategoryUuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
}

/// New Rating Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub uuid: RatingUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub user_uuid: UserUuid,
    pub value: u8,
    pub review: Option<String>,
}
