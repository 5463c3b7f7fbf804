//! Tiffin
//!
//! Ordering rules for a food delivery service: restaurant-scoped cart aggregation,
//! checkout planning, payment methods and the order status lifecycle.
//!
//! Nothing in this crate touches storage. The `tiffin-app` crate persists the plans
//! produced here inside a single database transaction.

pub mod cart;
pub mod checkout;
pub mod payment;
pub mod policy;
pub mod prelude;
pub mod status;
