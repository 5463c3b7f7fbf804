//! Cart Data

use crate::domain::{carts::records::CartItemUuid, restaurants::records::MenuItemUuid};

/// New Cart Item Data
///
/// The restaurant is taken from the menu item. Adding an item already in the cart
/// increases its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub item_uuid: MenuItemUuid,
    pub quantity: u32,
}
