//! Cart Records

use jiff::Timestamp;
use tiffin::cart::{self, CartLine};

use crate::{
    domain::{
        restaurants::records::{MenuItemUuid, RestaurantUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// A user's cart grouped by restaurant.
pub type CartAggregation = cart::CartAggregation<MenuItemUuid, RestaurantUuid>;

/// Cart lines for one restaurant, ready to become one order.
pub type CartGroup = cart::RestaurantCartGroup<MenuItemUuid, RestaurantUuid>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub item_uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart item joined with its menu entry and restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineRecord {
    pub cart_item_uuid: CartItemUuid,
    pub item_uuid: MenuItemUuid,
    pub item_name: String,
    pub restaurant_uuid: RestaurantUuid,
    pub restaurant_name: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl CartLineRecord {
    /// Strip display names, keeping what aggregation prices.
    pub fn to_cart_line(&self) -> CartLine<MenuItemUuid, RestaurantUuid> {
        CartLine {
            item: self.item_uuid,
            restaurant: self.restaurant_uuid,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}
