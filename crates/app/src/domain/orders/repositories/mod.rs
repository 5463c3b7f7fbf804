//! Order Repositories

mod items;
mod orders;
mod payments;

pub(crate) use items::SqliteOrderItemsRepository;
pub(crate) use orders::SqliteOrdersRepository;
pub(crate) use payments::SqlitePaymentsRepository;
