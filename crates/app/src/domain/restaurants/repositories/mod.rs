//! Restaurant Repositories

mod menu_categories;
mod menu_items;
mod ratings;
mod restaurants;

pub(crate) use menu_categories::SqliteMenuCategoriesRepository;
pub(crate) use menu_items::SqliteMenuItemsRepository;
pub(crate) use ratings::SqliteRatingsRepository;
pub(crate) use restaurants::SqliteRestaurantsRepository;
