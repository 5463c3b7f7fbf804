//! Restaurants service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::restaurants::{
        data::{NewMenuCategory, NewMenuItem, NewRating, NewRestaurant, RestaurantUpdate},
        errors::RestaurantsServiceError,
        records::{
            MenuCategoryRecord, MenuCategoryUuid, MenuItemRecord, RestaurantRecord,
            RestaurantUuid,
        },
        repositories::{
            SqliteMenuCategoriesRepository, SqliteMenuItemsRepository, SqliteRatingsRepository,
            SqliteRestaurantsRepository,
        },
    },
};

/// Accepted rating values.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone)]
pub struct SqliteRestaurantsService {
    db: Db,
    restaurants: SqliteRestaurantsRepository,
    menu_categories: SqliteMenuCategoriesRepository,
    menu_items: SqliteMenuItemsRepository,
    ratings: SqliteRatingsRepository,
}

impl SqliteRestaurantsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            restaurants: SqliteRestaurantsRepository::new(),
            menu_categories: SqliteMenuCategoriesRepository::new(),
            menu_items: SqliteMenuItemsRepository::new(),
            ratings: SqliteRatingsRepository::new(),
        }
    }
}

#[async_trait]
impl RestaurantsService for SqliteRestaurantsService {
    #[tracing::instrument(
        name = "restaurants.service.create_restaurant",
        skip(self, restaurant),
        fields(restaurant_uuid = %restaurant.uuid),
        err
    )]
    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .restaurants
            .create_restaurant(&mut tx, restaurant, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!(restaurant_uuid = %created.uuid, "created restaurant");

        Ok(created)
    }

    async fn get_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let restaurant = self.restaurants.get_restaurant(&mut tx, restaurant).await?;

        tx.commit().await?;

        Ok(restaurant)
    }

    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let restaurants = self.restaurants.list_restaurants(&mut tx).await?;

        tx.commit().await?;

        Ok(restaurants)
    }

    #[tracing::instrument(
        name = "restaurants.service.update_restaurant",
        skip(self, update),
        fields(restaurant_uuid = %restaurant),
        err
    )]
    async fn update_restaurant(
        &self,
        restaurant: RestaurantUuid,
        update: RestaurantUpdate,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .restaurants
            .update_restaurant(&mut tx, restaurant, update, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!("updated restaurant settings");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "restaurants.service.create_menu_category",
        skip(self, category),
        fields(restaurant_uuid = %category.restaurant_uuid, menu_category_uuid = %category.uuid),
        err
    )]
    async fn create_menu_category(
        &self,
        category: NewMenuCategory,
    ) -> Result<MenuCategoryRecord, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .menu_categories
            .create_menu_category(&mut tx, category, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_menu_categories(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<MenuCategoryRecord>, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        self.restaurants.get_restaurant(&mut tx, restaurant).await?;

        let categories = self
            .menu_categories
            .list_menu_categories(&mut tx, restaurant)
            .await?;

        tx.commit().await?;

        Ok(categories)
    }

    #[tracing::instrument(
        name = "restaurants.service.create_menu_item",
        skip(self, item),
        fields(restaurant_uuid = %item.restaurant_uuid, menu_item_uuid = %item.uuid),
        err
    )]
    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .menu_items
            .create_menu_item(&mut tx, item, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_menu_items(
        &self,
        restaurant: RestaurantUuid,
        category: Option<MenuCategoryUuid>,
    ) -> Result<Vec<MenuItemRecord>, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        // Distinguish an unknown restaurant from one with an empty menu.
        self.restaurants.get_restaurant(&mut tx, restaurant).await?;

        let items = self
            .menu_items
            .list_menu_items(&mut tx, restaurant, category)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    #[tracing::instrument(
        name = "restaurants.service.rate_restaurant",
        skip(self, rating),
        fields(
            restaurant_uuid = %rating.restaurant_uuid,
            user_uuid = %rating.user_uuid,
            value = rating.value
        ),
        err
    )]
    async fn rate_restaurant(
        &self,
        rating: NewRating,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        if !RATING_RANGE.contains(&rating.value) {
            return Err(RestaurantsServiceError::InvalidRating(rating.value));
        }

        let restaurant = rating.restaurant_uuid;
        let point_in_time = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let stored = self
            .ratings
            .upsert_rating(&mut tx, rating, point_in_time)
            .await?;

        let rated = self
            .restaurants
            .refresh_rating_totals(&mut tx, restaurant, point_in_time)
            .await?;

        tx.commit().await?;

        info!(
            rating_uuid = %stored.uuid,
            ratings_count = rated.ratings_count,
            "recorded rating"
        );

        Ok(rated)
    }
}

#[automock]
#[async_trait]
pub trait RestaurantsService: Send + Sync {
    /// Register a restaurant.
    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    /// Retrieve a single restaurant.
    async fn get_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    /// All restaurants, by name.
    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>, RestaurantsServiceError>;

    /// Change a restaurant's settings, keeping any field the update leaves unset.
    async fn update_restaurant(
        &self,
        restaurant: RestaurantUuid,
        update: RestaurantUpdate,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    /// Add a section such as "Starters" to a restaurant's menu.
    async fn create_menu_category(
        &self,
        category: NewMenuCategory,
    ) -> Result<MenuCategoryRecord, RestaurantsServiceError>;

    /// A restaurant's menu sections, by name.
    async fn list_menu_categories(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<MenuCategoryRecord>, RestaurantsServiceError>;

    /// Add an item to a restaurant's menu.
    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, RestaurantsServiceError>;

    /// A restaurant's menu, by item name, optionally limited to one category.
    async fn list_menu_items(
        &self,
        restaurant: RestaurantUuid,
        category: Option<MenuCategoryUuid>,
    ) -> Result<Vec<MenuItemRecord>, RestaurantsServiceError>;

    /// Record a user's rating, replacing any earlier one, and return the restaurant
    /// with refreshed totals.
    async fn rate_restaurant(
        &self,
        rating: NewRating,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::restaurants::records::{MenuCategoryUuid, MenuItemUuid, RatingUuid},
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn create_restaurant_starts_unrated() -> TestResult {
        let ctx = TestContext::new().await?;

        let restaurant = helpers::create_restaurant(&ctx, "Anand Bhavan").await?;

        assert_eq!(restaurant.name, "Anand Bhavan");
        assert_eq!(restaurant.ratings_count, 0);
        assert_eq!(restaurant.average_rating(), None);

        Ok(())
    }

    #[tokio::test]
    async fn blank_restaurant_name_is_invalid() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = helpers::create_restaurant(&ctx, "   ").await;

        assert!(
            matches!(result, Err(RestaurantsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_restaurants_orders_by_name() -> TestResult {
        let ctx = TestContext::new().await?;

        helpers::create_restaurant(&ctx, "Zaffran").await?;
        helpers::create_restaurant(&ctx, "Annapoorna").await?;

        let names: Vec<String> = ctx
            .restaurants
            .list_restaurants()
            .await?
            .into_iter()
            .map(|restaurant| restaurant.name)
            .collect();

        assert_eq!(names, ["Annapoorna", "Zaffran"]);

        Ok(())
    }

    #[tokio::test]
    async fn update_restaurant_replaces_settings() -> TestResult {
        let ctx = TestContext::new().await?;
        let restaurant = helpers::create_restaurant(&ctx, "Old Name").await?;

        let updated = ctx
            .restaurants
            .update_restaurant(
                restaurant.uuid,
                RestaurantUpdate {
                    name: Some("New Name".to_string()),
                    address: Some("12 MG Road".to_string()),
                    phone_number: None,
                    email: Some("orders@newname.example".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.address.as_deref(), Some("12 MG Road"));
        assert!(updated.updated_at >= restaurant.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn renaming_restaurant_keeps_other_settings() -> TestResult {
        let ctx = TestContext::new().await?;
        let restaurant = ctx
            .restaurants
            .create_restaurant(NewRestaurant {
                uuid: RestaurantUuid::new(),
                name: "Old Name".to_string(),
                address: Some("12 MG Road".to_string()),
                phone_number: Some("080 2222 3333".to_string()),
                email: Some("orders@oldname.example".to_string()),
            })
            .await?;

        let updated = ctx
            .restaurants
            .update_restaurant(
                restaurant.uuid,
                RestaurantUpdate {
                    name: Some("New Name".to_string()),
                    ..RestaurantUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.address, restaurant.address);
        assert_eq!(updated.phone_number, restaurant.phone_number);
        assert_eq!(updated.email, restaurant.email);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_restaurant_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .restaurants
            .update_restaurant(
                RestaurantUuid::new(),
                RestaurantUpdate {
                    name: Some("Ghost Kitchen".to_string()),
                    ..RestaurantUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(RestaurantsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn menu_items_are_listed_per_restaurant() -> TestResult {
        let ctx = TestContext::new().await?;
        let first = helpers::create_restaurant(&ctx, "First").await?;
        let second = helpers::create_restaurant(&ctx, "Second").await?;

        helpers::create_menu_item(&ctx, first.uuid, "Vada", 30_00).await?;
        helpers::create_menu_item(&ctx, first.uuid, "Dosa", 80_00).await?;
        helpers::create_menu_item(&ctx, second.uuid, "Biryani", 250_00).await?;

        let menu = ctx.restaurants.list_menu_items(first.uuid, None).await?;

        let names: Vec<&str> = menu.iter().map(|item| item.name.as_str()).collect();

        assert_eq!(names, ["Dosa", "Vada"]);
        assert!(menu.iter().all(|item| item.restaurant_uuid == first.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn menu_item_for_unknown_restaurant_is_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .restaurants
            .create_menu_item(NewMenuItem {
                uuid: MenuItemUuid::new(),
                restaurant_uuid: RestaurantUuid::new(),
                category_uuid: None,
                name: "Orphan".to_string(),
                description: None,
                price: 10_00,
            })
            .await;

        assert!(
            matches!(result, Err(RestaurantsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn menu_categories_are_listed_by_name() -> TestResult {
        let ctx = TestContext::new().await?;
        let restaurant = helpers::create_restaurant(&ctx, "Udupi Bhavan").await?;
        let other = helpers::create_restaurant(&ctx, "Paradise").await?;

        helpers::create_menu_category(&ctx, restaurant.uuid, "Tiffin").await?;
        helpers::create_menu_category(&ctx, restaurant.uuid, "Beverages").await?;
        helpers::create_menu_category(&ctx, other.uuid, "Biryani").await?;

        let names: Vec<String> = ctx
            .restaurants
            .list_menu_categories(restaurant.uuid)
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect();

        assert_eq!(names, ["Beverages", "Tiffin"]);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_category_name_already_exists() -> TestResult {
        let ctx = TestContext::new().await?;
        let restaurant = helpers::create_restaurant(&ctx, "Udupi Bhavan").await?;

        helpers::create_menu_category(&ctx, restaurant.uuid, "Tiffin").await?;

        let result = helpers::create_menu_category(&ctx, restaurant.uuid, "Tiffin").await;

        assert!(
            matches!(result, Err(RestaurantsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn categories_of_unknown_restaurant_are_not_found() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .restaurants
            .list_menu_categories(RestaurantUuid::new())
            .await;

        assert!(
            matches!(result, Err(RestaurantsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn menu_can_be_filtered_by_category() -> TestResult {
        let ctx = TestContext::new().await?;
        let restaurant = helpers::create_restaurant(&ctx, "Udupi Bhavan").await?;
        let tiffin = helpers::create_menu_category(&ctx, restaurant.uuid, "Tiffin").await?;
        let beverages = helpers::create_menu_category(&ctx, restaurant.uuid, "Beverages").await?;

        for (category, name, price) in [
            (Some(tiffin.uuid), "Idli", 40_00),
            (Some(tiffin.uuid), "Dosa", 80_00),
            (Some(beverages.uuid), "Filter Coffee", 25_00),
            (None, "Sweet of the Day", 50_00),
        ] {
            ctx.restaurants
                .create_menu_item(NewMenuItem {
                    uuid: MenuItemUuid::new(),
                    restaurant_uuid: restaurant.uuid,
                    category_uuid: category,
                    name: name.to_string(),
                    description: None,
                    price,
                })
                .await?;
        }

        let tiffin_items = ctx
            .restaurants
            .list_menu_items(restaurant.uuid, Some(tiffin.uuid))
            .await?;
        let names: Vec<&str> = tiffin_items.iter().map(|item| item.name.as_str()).collect();

        assert_eq!(names, ["Dosa", "Idli"]);
        assert!(
            tiffin_items
                .iter()
                .all(|item| item.category_uuid == Some(tiffin.uuid))
        );
        assert_eq!(
            ctx.restaurants
                .list_menu_items(restaurant.uuid, None)
                .await?
                .len(),
            4
        );

        Ok(())
    }

    #[tokio::test]
    async fn menu_item_in_another_restaurants_category_is_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await?;
        let restaurant = helpers::create_restaurant(&ctx, "Udupi Bhavan").await?;
        let other = helpers::create_restaurant(&ctx, "Paradise").await?;
        let biryani = helpers::create_menu_category(&ctx, other.uuid, "Biryani").await?;

        for category in [biryani.uuid, MenuCategoryUuid::new()] {
            let result = ctx
                .restaurants
                .create_menu_item(NewMenuItem {
                    uuid: MenuItemUuid::new(),
                    restaurant_uuid: restaurant.uuid,
                    category_uuid: Some(category),
                    name: "Misfiled".to_string(),
                    description: None,
                    price: 10_00,
                })
                .await;

            assert!(
                matches!(result, Err(RestaurantsServiceError::InvalidReference)),
                "expected InvalidReference, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn re_rating_replaces_the_previous_value() -> TestResult {
        let ctx = TestContext::new().await?;
        let restaurant = helpers::create_restaurant(&ctx, "Rated").await?;
        let asha = helpers::create_user(&ctx, "asha").await?;
        let ravi = helpers::create_user(&ctx, "ravi").await?;

        for (user, value) in [(asha.uuid, 2), (ravi.uuid, 5), (asha.uuid, 4)] {
            ctx.restaurants
                .rate_restaurant(NewRating {
                    uuid: RatingUuid::new(),
                    restaurant_uuid: restaurant.uuid,
                    user_uuid: user,
                    value,
                    review: None,
                })
                .await?;
        }

        let rated = ctx.restaurants.get_restaurant(restaurant.uuid).await?;

        assert_eq!(rated.ratings_count, 2);
        assert_eq!(rated.rating_sum, 9);
        assert_eq!(rated.average_rating(), Some(4.5));

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() -> TestResult {
        let ctx = TestContext::new().await?;
        let restaurant = helpers::create_restaurant(&ctx, "Rated").await?;
        let user = helpers::create_user(&ctx, "asha").await?;

        for value in [0, 6] {
            let result = ctx
                .restaurants
                .rate_restaurant(NewRating {
                    uuid: RatingUuid::new(),
                    restaurant_uuid: restaurant.uuid,
                    user_uuid: user.uuid,
                    value,
                    review: None,
                })
                .await;

            assert!(
                matches!(result, Err(RestaurantsServiceError::InvalidRating(v)) if v == value),
                "expected InvalidRating for {value}, got {result:?}"
            );
        }

        let unchanged = ctx.restaurants.get_restaurant(restaurant.uuid).await?;

        assert_eq!(unchanged.ratings_count, 0);

        Ok(())
    }
}
