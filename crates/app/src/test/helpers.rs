//! Test Helpers

use testresult::TestResult;

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartAggregation, CartGroup, CartItemRecord, CartItemUuid},
        },
        restaurants::{
            RestaurantsService, RestaurantsServiceError,
            data::{NewMenuCategory, NewMenuItem, NewRestaurant},
            records::{
                MenuCategoryRecord, MenuCategoryUuid, MenuItemRecord, MenuItemUuid,
                RestaurantRecord, RestaurantUuid,
            },
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone_number: None,
        })
        .await
}

pub(crate) async fn create_restaurant(
    ctx: &TestContext,
    name: &str,
) -> Result<RestaurantRecord, RestaurantsServiceError> {
    ctx.restaurants
        .create_restaurant(NewRestaurant {
            uuid: RestaurantUuid::new(),
            name: name.to_string(),
            address: None,
            phone_number: None,
            email: None,
        })
        .await
}

pub(crate) async fn create_menu_item(
    ctx: &TestContext,
    restaurant: RestaurantUuid,
    name: &str,
    price: u64,
) -> Result<MenuItemRecord, RestaurantsServiceError> {
    ctx.restaurants
        .create_menu_item(NewMenuItem {
            uuid: MenuItemUuid::new(),
            restaurant_uuid: restaurant,
            category_uuid: None,
            name: name.to_string(),
            description: None,
            price,
        })
        .await
}

pub(crate) async fn create_menu_category(
    ctx: &TestContext,
    restaurant: RestaurantUuid,
    name: &str,
) -> Result<MenuCategoryRecord, RestaurantsServiceError> {
    ctx.restaurants
        .create_menu_category(NewMenuCategory {
            uuid: MenuCategoryUuid::new(),
            restaurant_uuid: restaurant,
            name: name.to_string(),
        })
        .await
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    item: MenuItemUuid,
    quantity: u32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                uuid: CartItemUuid::new(),
                item_uuid: item,
                quantity,
            },
        )
        .await
}

/// Fill the user's cart with two Dosas from "Udupi Bhavan" and one Biryani from
/// "Paradise", in that order.
pub(crate) async fn two_restaurant_cart(
    ctx: &TestContext,
    user: UserUuid,
) -> TestResult<(RestaurantUuid, RestaurantUuid)> {
    let udupi = create_restaurant(ctx, "Udupi Bhavan").await?;
    let paradise = create_restaurant(ctx, "Paradise").await?;

    let dosa = create_menu_item(ctx, udupi.uuid, "Dosa", 100_00).await?;
    let biryani = create_menu_item(ctx, paradise.uuid, "Biryani", 50_00).await?;

    add_to_cart(ctx, user, dosa.uuid, 2).await?;
    add_to_cart(ctx, user, biryani.uuid, 1).await?;

    Ok((udupi.uuid, paradise.uuid))
}

/// The user's cart grouped by restaurant, ready for checkout.
pub(crate) async fn cart_groups(ctx: &TestContext, user: UserUuid) -> TestResult<Vec<CartGroup>> {
    match ctx.carts.aggregate_cart(user).await? {
        CartAggregation::Groups(aggregate) => Ok(aggregate.into_groups()),
        CartAggregation::Empty => Ok(Vec::new()),
    }
}
