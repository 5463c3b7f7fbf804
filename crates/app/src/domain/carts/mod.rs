//! Carts

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub(crate) use repository::SqliteCartItemsRepository;

pub use errors::CartsServiceError;
pub use service::*;
