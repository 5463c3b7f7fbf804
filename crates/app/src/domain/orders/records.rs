//! Order Records

use jiff::Timestamp;
use tiffin::{
    payment::{PaymentMethod, PaymentStatus},
    status::OrderStatus,
};
use uuid::Uuid;

use crate::{
    domain::{
        restaurants::records::{MenuItemUuid, RestaurantUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order type written for every checkout.
pub const DELIVERY_ORDER_TYPE: &str = "delivery";

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub restaurant_uuid: RestaurantUuid,
    /// Restaurant subtotal, excluding shipping.
    pub total_amount: u64,
    pub shipping_cost: u64,
    pub status: OrderStatus,
    pub order_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// What the customer paid: subtotal plus shipping.
    pub fn amount_due(&self) -> Option<u64> {
        self.total_amount.checked_add(self.shipping_cost)
    }
}

/// An order with the name of the restaurant fulfilling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order: OrderRecord,
    pub restaurant_name: String,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
///
/// `price` is the unit price captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub item_uuid: MenuItemUuid,
    pub item_name: String,
    pub quantity: u32,
    pub price: u64,
}

/// Payment UUID
pub type PaymentUuid = TypedUuid<PaymentRecord>;

/// Payment Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub uuid: PaymentUuid,
    pub order_uuid: OrderUuid,
    pub payment_method: PaymentMethod,
    pub transaction_uuid: Uuid,
    pub amount: u64,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
}

/// Everything shown when an order is opened or tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub summary: OrderSummary,
    pub items: Vec<OrderItemRecord>,
    pub payment: Option<PaymentRecord>,
    pub estimated_delivery_at: Timestamp,
}

impl OrderView {
    pub fn order(&self) -> &OrderRecord {
        &self.summary.order
    }
}

/// Dashboard figures for a restaurant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestaurantOrderStats {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub delivered_orders: u64,
    /// Sum of order subtotals placed since the requested instant.
    pub revenue: u64,
}
