//! Ordering Domain Concerns

pub mod carts;
pub mod orders;
pub mod restaurants;
pub mod users;
