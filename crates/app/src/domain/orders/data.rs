//! Order Data

use jiff::Timestamp;
use tiffin::{checkout::OrderConfirmation, status::OrderStatus};

use crate::domain::{
    orders::records::OrderUuid, restaurants::records::RestaurantUuid, users::records::UserUuid,
};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub total_amount: u64,
    pub shipping_cost: u64,
}

/// Filters for a restaurant's order table. `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub placed_since: Option<Timestamp>,
    pub placed_before: Option<Timestamp>,
}

/// Orders written by a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// One order per restaurant, in cart order.
    pub order_uuids: Vec<OrderUuid>,
    pub confirmation: OrderConfirmation,
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Orders, items and payments were committed and the cart cleared.
    Placed(CheckoutReceipt),

    /// There was nothing to check out. No rows were written.
    EmptyCart,
}
