use std::io;

use clap::{Args, Subcommand};
use tiffin_app::{
    context::AppContext,
    domain::{
        carts::{data::NewCartItem, records::CartItemUuid},
        restaurants::records::MenuItemUuid,
        users::records::UserUuid,
    },
};

use super::{failure, render};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a menu item, or more of one already in the cart
    Add(AddToCartArgs),

    /// Set a line's quantity; zero removes it
    Update(UpdateLineArgs),

    /// Remove a line
    Remove(RemoveLineArgs),

    /// Show the cart grouped by restaurant
    Show(ShowCartArgs),
}

#[derive(Debug, Args)]
struct AddToCartArgs {
    #[arg(long)]
    user: UserUuid,

    #[arg(long)]
    item: MenuItemUuid,

    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct UpdateLineArgs {
    #[arg(long)]
    user: UserUuid,

    #[arg(long)]
    line: CartItemUuid,

    #[arg(long)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct RemoveLineArgs {
    #[arg(long)]
    user: UserUuid,

    #[arg(long)]
    line: CartItemUuid,
}

#[derive(Debug, Args)]
struct ShowCartArgs {
    #[arg(long)]
    user: UserUuid,
}

pub(crate) async fn run(
    command: CartCommand,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let user = match command.command {
        CartSubcommand::Add(args) => {
            ctx.carts
                .add_item(
                    args.user,
                    NewCartItem {
                        uuid: CartItemUuid::new(),
                        item_uuid: args.item,
                        quantity: args.quantity,
                    },
                )
                .await
                .map_err(|error| failure("add to cart", &error))?;

            args.user
        }
        CartSubcommand::Update(args) => {
            ctx.carts
                .update_quantity(args.user, args.line, args.quantity)
                .await
                .map_err(|error| failure("update cart", &error))?;

            args.user
        }
        CartSubcommand::Remove(args) => {
            ctx.carts
                .remove_item(args.user, args.line)
                .await
                .map_err(|error| failure("remove from cart", &error))?;

            args.user
        }
        CartSubcommand::Show(args) => args.user,
    };

    show(user, ctx, out).await
}

async fn show(user: UserUuid, ctx: &AppContext, out: &mut impl io::Write) -> Result<(), String> {
    let aggregation = ctx
        .carts
        .aggregate_cart(user)
        .await
        .map_err(|error| failure("read cart", &error))?;

    let lines = ctx
        .carts
        .get_cart_lines(user)
        .await
        .map_err(|error| failure("read cart", &error))?;

    render::write_cart(out, &lines, &aggregation).map_err(|error| failure("write output", &error))
}
