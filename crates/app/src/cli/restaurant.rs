use std::io;

use clap::{Args, Subcommand};
use tiffin_app::{
    context::AppContext,
    domain::{
        restaurants::{
            data::{NewRating, NewRestaurant, RestaurantUpdate},
            records::{RatingUuid, RestaurantUuid},
        },
        users::records::UserUuid,
    },
};

use super::{failure, render};

#[derive(Debug, Args)]
pub(crate) struct RestaurantCommand {
    #[command(subcommand)]
    command: RestaurantSubcommand,
}

#[derive(Debug, Subcommand)]
enum RestaurantSubcommand {
    /// Register a restaurant
    Create(RestaurantDetails),

    /// List restaurants by name
    List,

    /// Change a restaurant's settings; omitted fields keep their value
    Update(UpdateRestaurantArgs),

    /// Rate a restaurant from 1 to 5, replacing the customer's earlier rating
    Rate(RateRestaurantArgs),
}

#[derive(Debug, Args)]
struct RestaurantDetails {
    #[arg(long)]
    name: String,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    phone_number: Option<String>,

    #[arg(long)]
    email: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateRestaurantArgs {
    #[arg(long)]
    restaurant: RestaurantUuid,

    #[command(flatten)]
    settings: RestaurantSettings,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = true)]
struct RestaurantSettings {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    phone_number: Option<String>,

    #[arg(long)]
    email: Option<String>,
}

#[derive(Debug, Args)]
struct RateRestaurantArgs {
    #[arg(long)]
    restaurant: RestaurantUuid,

    #[arg(long)]
    user: UserUuid,

    #[arg(long)]
    value: u8,

    #[arg(long)]
    review: Option<String>,
}

pub(crate) async fn run(
    command: RestaurantCommand,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let restaurants = match command.command {
        RestaurantSubcommand::Create(details) => vec![
            ctx.restaurants
                .create_restaurant(NewRestaurant {
                    uuid: RestaurantUuid::new(),
                    name: details.name,
                    address: details.address,
                    phone_number: details.phone_number,
                    email: details.email,
                })
                .await
                .map_err(|error| failure("create restaurant", &error))?,
        ],
        RestaurantSubcommand::List => ctx
            .restaurants
            .list_restaurants()
            .await
            .map_err(|error| failure("list restaurants", &error))?,
        RestaurantSubcommand::Update(args) => vec![
            ctx.restaurants
                .update_restaurant(
                    args.restaurant,
                    RestaurantUpdate {
                        name: args.settings.name,
                        address: args.settings.address,
                        phone_number: args.settings.phone_number,
                        email: args.settings.email,
                    },
                )
                .await
                .map_err(|error| failure("update restaurant", &error))?,
        ],
        RestaurantSubcommand::Rate(args) => vec![
            ctx.restaurants
                .rate_restaurant(NewRating {
                    uuid: RatingUuid::new(),
                    restaurant_uuid: args.restaurant,
                    user_uuid: args.user,
                    value: args.value,
                    review: args.review,
                })
                .await
                .map_err(|error| failure("rate restaurant", &error))?,
        ],
    };

    render::write_restaurants(out, &restaurants).map_err(|error| failure("write output", &error))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::Timestamp;
    use testresult::TestResult;
    use tiffin::policy::OrderPolicy;
    use tiffin_app::domain::{
        carts::MockCartsService,
        orders::MockOrdersService,
        restaurants::{MockRestaurantsService, records::RestaurantRecord},
        users::MockUsersService,
    };

    use super::*;

    #[tokio::test]
    async fn update_sends_only_the_given_settings() -> TestResult {
        let restaurant = RestaurantUuid::new();
        let mut restaurants = MockRestaurantsService::new();

        restaurants
            .expect_update_restaurant()
            .withf(move |uuid, update| {
                *uuid == restaurant
                    && *update
                        == RestaurantUpdate {
                            name: Some("Udupi Bhavan".to_string()),
                            ..RestaurantUpdate::default()
                        }
            })
            .once()
            .returning(move |uuid, _| {
                Ok(RestaurantRecord {
                    uuid,
                    name: "Udupi Bhavan".to_string(),
                    address: Some("12 MG Road".to_string()),
                    phone_number: None,
                    email: None,
                    rating_sum: 0,
                    ratings_count: 0,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let ctx = AppContext {
            users: Arc::new(MockUsersService::new()),
            restaurants: Arc::new(restaurants),
            carts: Arc::new(MockCartsService::new()),
            orders: Arc::new(MockOrdersService::new()),
            policy: OrderPolicy::default(),
        };
        let mut out = Vec::new();

        let result = run(
            RestaurantCommand {
                command: RestaurantSubcommand::Update(UpdateRestaurantArgs {
                    restaurant,
                    settings: RestaurantSettings {
                        name: Some("Udupi Bhavan".to_string()),
                        address: None,
                        phone_number: None,
                        email: None,
                    },
                }),
            },
            &ctx,
            &mut out,
        )
        .await;

        assert!(result.is_ok(), "got {result:?}");
        assert!(String::from_utf8(out)?.contains("12 MG Road"));

        Ok(())
    }
}
