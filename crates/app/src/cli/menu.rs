use std::io;

use clap::{Args, Subcommand};
use tiffin_app::{
    context::AppContext,
    domain::restaurants::{
        data::{NewMenuCategory, NewMenuItem},
        records::{MenuCategoryUuid, MenuItemUuid, RestaurantUuid},
    },
};

use super::{failure, render};

#[derive(Debug, Args)]
pub(crate) struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuSubcommand {
    /// Add an item to a restaurant's menu
    Add(AddMenuItemArgs),

    /// Show a restaurant's menu
    List(ListMenuArgs),

    /// Add a menu section such as "Starters"
    AddCategory(AddCategoryArgs),

    /// Show a restaurant's menu sections
    Categories(ListCategoriesArgs),
}

#[derive(Debug, Args)]
struct AddMenuItemArgs {
    #[arg(long)]
    restaurant: RestaurantUuid,

    #[arg(long)]
    name: String,

    /// Price in paise
    #[arg(long)]
    price: u64,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    category: Option<MenuCategoryUuid>,
}

#[derive(Debug, Args)]
struct ListMenuArgs {
    #[arg(long)]
    restaurant: RestaurantUuid,

    /// Only items in this section
    #[arg(long)]
    category: Option<MenuCategoryUuid>,
}

#[derive(Debug, Args)]
struct AddCategoryArgs {
    #[arg(long)]
    restaurant: RestaurantUuid,

    #[arg(long)]
    name: String,
}

#[derive(Debug, Args)]
struct ListCategoriesArgs {
    #[arg(long)]
    restaurant: RestaurantUuid,
}

pub(crate) async fn run(
    command: MenuCommand,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let items = match command.command {
        MenuSubcommand::Add(args) => vec![
            ctx.restaurants
                .create_menu_item(NewMenuItem {
                    uuid: MenuItemUuid::new(),
                    restaurant_uuid: args.restaurant,
                    category_uuid: args.category,
                    name: args.name,
                    description: args.description,
                    price: args.price,
                })
                .await
                .map_err(|error| failure("add menu item", &error))?,
        ],
        MenuSubcommand::List(args) => ctx
            .restaurants
            .list_menu_items(args.restaurant, args.category)
            .await
            .map_err(|error| failure("list menu", &error))?,
        MenuSubcommand::AddCategory(args) => {
            let category = ctx
                .restaurants
                .create_menu_category(NewMenuCategory {
                    uuid: MenuCategoryUuid::new(),
                    restaurant_uuid: args.restaurant,
                    name: args.name,
                })
                .await
                .map_err(|error| failure("add menu category", &error))?;

            return render::write_categories(out, &[category])
                .map_err(|error| failure("write output", &error));
        }
        MenuSubcommand::Categories(args) => {
            let categories = ctx
                .restaurants
                .list_menu_categories(args.restaurant)
                .await
                .map_err(|error| failure("list menu categories", &error))?;

            return render::write_categories(out, &categories)
                .map_err(|error| failure("write output", &error));
        }
    };

    render::write_menu(out, &items).map_err(|error| failure("write output", &error))
}
