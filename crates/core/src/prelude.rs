//! Prelude

pub use crate::{
    cart::{
        CartAggregate, CartAggregation, CartError, CartLine, GroupLines, RestaurantCartGroup,
        aggregate,
    },
    checkout::{CheckoutPlan, OrderConfirmation, PlannedItem, PlannedOrder},
    payment::{ParsePaymentMethodError, ParsePaymentStatusError, PaymentMethod, PaymentStatus},
    policy::{DEFAULT_CONFIRMATION_ETA, DEFAULT_DELIVERY_WINDOW, DEFAULT_SHIPPING_COST, OrderPolicy},
    status::{OrderStatus, ParseOrderStatusError},
};
