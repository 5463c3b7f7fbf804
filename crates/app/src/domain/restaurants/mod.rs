//! Restaurants

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;

pub(crate) use repositories::SqliteRestaurantsRepository;

pub use errors::RestaurantsServiceError;
pub use service::*;
