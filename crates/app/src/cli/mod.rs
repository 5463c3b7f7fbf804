use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tiffin_app::context::AppContext;

use crate::config::{DatabaseConfig, LoggingConfig, PolicyConfig};

mod cart;
mod checkout;
mod menu;
mod order;
mod render;
mod restaurant;
mod user;

#[derive(Debug, Parser)]
#[command(name = "tiffin", about = "Tiffin food-ordering CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) database: DatabaseConfig,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(flatten)]
    pub(crate) policy: PolicyConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    #[command(subcommand)]
    Db(DbSubcommand),

    /// Customer accounts
    User(user::UserCommand),

    /// Restaurants and their settings
    Restaurant(restaurant::RestaurantCommand),

    /// Restaurant menus
    Menu(menu::MenuCommand),

    /// A customer's cart
    Cart(cart::CartCommand),

    /// Place orders for everything in a customer's cart
    Checkout(checkout::CheckoutArgs),

    /// Order tracking and administration
    Order(order::OrderCommand),
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending migrations
    Migrate,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        // Connecting applies any pending migrations.
        let ctx = AppContext::from_database_url(
            &self.database.database_url,
            self.policy.order_policy(),
        )
        .await
        .map_err(|error| failure("open database", &error))?;

        let mut out = io::stdout().lock();

        match self.command {
            Commands::Db(DbSubcommand::Migrate) => {
                writeln!(out, "database is up to date").map_err(|error| error.to_string())
            }
            Commands::User(command) => user::run(command, &ctx, &mut out).await,
            Commands::Restaurant(command) => restaurant::run(command, &ctx, &mut out).await,
            Commands::Menu(command) => menu::run(command, &ctx, &mut out).await,
            Commands::Cart(command) => cart::run(command, &ctx, &mut out).await,
            Commands::Checkout(args) => checkout::run(args, &ctx, &mut out).await,
            Commands::Order(command) => order::run(command, &ctx, &mut out).await,
        }
    }
}

/// The innermost cause, shown after the top-level message.
fn source_message(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;

    while let Some(source) = current.source() {
        current = source;
    }

    current.to_string()
}

/// Format a service failure for the terminal.
fn failure(action: &str, error: &(dyn std::error::Error + 'static)) -> String {
    match error.source() {
        Some(_) => format!("failed to {action}: {error}: {}", source_message(error)),
        None => format!("failed to {action}: {error}"),
    }
}
