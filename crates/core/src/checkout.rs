//! Checkout Planning
//!
//! Turns restaurant groups into the orders, order items and payments that checkout
//! writes. Planning is pure; persisting the plan atomically is the caller's job.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{cart::RestaurantCartGroup, payment::PaymentMethod, policy::OrderPolicy};

/// An order item to be written, priced at the time of checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedItem<I> {
    /// Menu item
    pub item: I,

    /// Units ordered
    pub quantity: u32,

    /// Unit price captured at checkout, in minor units
    pub price: u64,
}

/// One order per restaurant, with its single payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOrder<I, R> {
    /// Restaurant fulfilling the order
    pub restaurant: R,

    /// Restaurant subtotal, excluding shipping
    pub total_amount: u64,

    /// Shipping charged on this order
    pub shipping_cost: u64,

    /// Amount recorded on the payment: subtotal plus shipping
    pub payment_amount: u64,

    /// Unique transaction identifier for the payment
    pub transaction_uuid: Uuid,

    /// Items in cart order
    pub items: Vec<PlannedItem<I>>,
}

/// Everything a checkout will write, one order per restaurant group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan<I, R> {
    orders: Vec<PlannedOrder<I, R>>,
    payment_method: PaymentMethod,
}

impl<I: Copy, R: Copy> CheckoutPlan<I, R> {
    /// Plan orders for each group, all paid with `payment_method`.
    pub fn new(groups: &[RestaurantCartGroup<I, R>], payment_method: PaymentMethod) -> Self {
        let orders = groups
            .iter()
            .map(|group| PlannedOrder {
                restaurant: *group.restaurant(),
                total_amount: group.subtotal(),
                shipping_cost: group.shipping_cost(),
                payment_amount: group.total(),
                transaction_uuid: Uuid::now_v7(),
                items: group
                    .lines()
                    .iter()
                    .map(|line| PlannedItem {
                        item: line.item,
                        quantity: line.quantity,
                        price: line.unit_price,
                    })
                    .collect(),
            })
            .collect();

        Self {
            orders,
            payment_method,
        }
    }
}

impl<I, R> CheckoutPlan<I, R> {
    /// Planned orders in group order.
    pub fn orders(&self) -> &[PlannedOrder<I, R>] {
        &self.orders
    }

    /// Method used for every payment in the plan.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Whether the plan writes nothing.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Confirmation shown to the customer after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Display number derived from the checkout time, e.g. `#20250417120000`.
    pub order_number: String,

    /// When checkout committed.
    pub placed_at: Timestamp,

    /// Quoted delivery estimate.
    pub estimated_delivery_at: Timestamp,
}

impl OrderConfirmation {
    /// Build the confirmation for a checkout that committed at `placed_at`.
    ///
    /// # Errors
    ///
    /// Returns an error when the estimate overflows the supported timestamp range.
    pub fn new(placed_at: Timestamp, policy: &OrderPolicy) -> Result<Self, jiff::Error> {
        Ok(Self {
            order_number: format!("#{}", placed_at.strftime("%Y%m%d%H%M%S")),
            placed_at,
            estimated_delivery_at: policy.confirmation_estimate(placed_at)?,
        })
    }
}
