use std::io;

use clap::{Args, Subcommand};
use jiff::Timestamp;
use tiffin::status::OrderStatus;
use tiffin_app::{
    context::AppContext,
    domain::{
        orders::{OrdersServiceError, data::OrderFilter, records::OrderUuid},
        restaurants::records::RestaurantUuid,
        users::records::UserUuid,
    },
};

use super::{failure, render};

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Open the tracking view; this advances the order's status when due
    Track(OrderArgs),

    /// Show an order without changing it
    Show(OrderArgs),

    /// Set an order's status (administrators)
    Status(SetStatusArgs),

    /// A customer's orders, newest first
    List(ListUserOrdersArgs),

    /// A restaurant's orders, newest first
    Restaurant(ListRestaurantOrdersArgs),

    /// Order counts and revenue for a restaurant
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
struct OrderArgs {
    #[arg(long)]
    order: OrderUuid,
}

#[derive(Debug, Args)]
struct SetStatusArgs {
    #[arg(long)]
    order: OrderUuid,

    /// pending, scheduled, shipped, delivered or cancelled
    #[arg(long)]
    status: String,
}

#[derive(Debug, Args)]
struct ListUserOrdersArgs {
    #[arg(long)]
    user: UserUuid,
}

#[derive(Debug, Args)]
struct ListRestaurantOrdersArgs {
    #[arg(long)]
    restaurant: RestaurantUuid,

    #[arg(long)]
    status: Option<String>,

    /// Only orders placed at or after this instant (RFC 3339)
    #[arg(long)]
    since: Option<Timestamp>,

    /// Only orders placed before this instant (RFC 3339)
    #[arg(long)]
    before: Option<Timestamp>,
}

#[derive(Debug, Args)]
struct StatsArgs {
    #[arg(long)]
    restaurant: RestaurantUuid,

    /// Count revenue from orders placed at or after this instant; defaults to the
    /// start of today (UTC)
    #[arg(long)]
    since: Option<Timestamp>,
}

pub(crate) async fn run(
    command: OrderCommand,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Track(args) => {
            let view = ctx
                .orders
                .track_and_advance_order(args.order, Timestamp::now())
                .await
                .map_err(|error| failure("track order", &error))?;

            render::write_order_view(out, &view).map_err(|error| failure("write output", &error))
        }
        OrderSubcommand::Show(args) => {
            let view = ctx
                .orders
                .get_order(args.order)
                .await
                .map_err(|error| failure("find order", &error))?;

            render::write_order_view(out, &view).map_err(|error| failure("write output", &error))
        }
        OrderSubcommand::Status(args) => {
            let status = parse_status(&args.status)?;

            let order = ctx
                .orders
                .set_order_status(args.order, status)
                .await
                .map_err(|error| failure("set order status", &error))?;

            writeln!(out, "order {} is now {}", order.uuid, order.status)
                .map_err(|error| failure("write output", &error))
        }
        OrderSubcommand::List(args) => {
            let orders = ctx
                .orders
                .list_user_orders(args.user)
                .await
                .map_err(|error| failure("list orders", &error))?;

            render::write_orders(out, &orders).map_err(|error| failure("write output", &error))
        }
        OrderSubcommand::Restaurant(args) => {
            let filter = OrderFilter {
                status: args.status.as_deref().map(parse_status).transpose()?,
                placed_since: args.since,
                placed_before: args.before,
            };

            let orders = ctx
                .orders
                .list_restaurant_orders(args.restaurant, filter)
                .await
                .map_err(|error| failure("list orders", &error))?;

            render::write_orders(out, &orders).map_err(|error| failure("write output", &error))
        }
        OrderSubcommand::Stats(args) => {
            let since = match args.since {
                Some(since) => since,
                None => start_of_today().map_err(|error| failure("compute today", &error))?,
            };

            let stats = ctx
                .orders
                .restaurant_order_stats(args.restaurant, since)
                .await
                .map_err(|error| failure("compute stats", &error))?;

            render::write_stats(out, &stats, since).map_err(|error| failure("write output", &error))
        }
    }
}

fn parse_status(value: &str) -> Result<OrderStatus, String> {
    value
        .parse::<OrderStatus>()
        .map_err(OrdersServiceError::from)
        .map_err(|error| failure("parse status", &error))
}

fn start_of_today() -> Result<Timestamp, jiff::Error> {
    Ok(Timestamp::now()
        .to_zoned(jiff::tz::TimeZone::UTC)
        .start_of_day()?
        .timestamp())
}
