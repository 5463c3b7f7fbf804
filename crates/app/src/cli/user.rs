use std::io;

use clap::{Args, Subcommand};
use tiffin_app::{
    context::AppContext,
    domain::users::{
        data::NewUser,
        records::{UserRecord, UserUuid},
    },
};

use super::{failure, render};

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register a customer
    Create(CreateUserArgs),

    /// Look up a customer by UUID or email
    Show(ShowUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone_number: Option<String>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ShowUserArgs {
    #[arg(long)]
    user: Option<UserUuid>,

    #[arg(long)]
    email: Option<String>,
}

pub(crate) async fn run(
    command: UserCommand,
    ctx: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let user = match command.command {
        UserSubcommand::Create(args) => create(args, ctx).await?,
        UserSubcommand::Show(args) => show(args, ctx).await?,
    };

    render::write_user(out, &user).map_err(|error| failure("write output", &error))
}

async fn create(args: CreateUserArgs, ctx: &AppContext) -> Result<UserRecord, String> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            email: args.email,
            phone_number: args.phone_number,
        })
        .await
        .map_err(|error| failure("create user", &error))
}

async fn show(args: ShowUserArgs, ctx: &AppContext) -> Result<UserRecord, String> {
    let found = match (args.user, args.email) {
        (Some(user), _) => ctx.users.get_user(user).await,
        (None, Some(email)) => ctx.users.get_user_by_email(&email).await,
        (None, None) => return Err("pass --user or --email".to_string()),
    };

    found.map_err(|error| failure("find user", &error))
}
