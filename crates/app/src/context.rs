//! App Context

use std::sync::Arc;

use thiserror::Error;
use tiffin::policy::OrderPolicy;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, SqliteCartsService},
        orders::{OrdersService, SqliteOrdersService},
        restaurants::{RestaurantsService, SqliteRestaurantsService},
        users::{SqliteUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to migrate database")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub restaurants: Arc<dyn RestaurantsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub policy: OrderPolicy,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails.
    pub async fn from_database_url(url: &str, policy: OrderPolicy) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(Db::new(pool), policy))
    }

    #[must_use]
    pub fn from_db(db: Db, policy: OrderPolicy) -> Self {
        Self {
            users: Arc::new(SqliteUsersService::new(db.clone())),
            restaurants: Arc::new(SqliteRestaurantsService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db.clone(), policy)),
            orders: Arc::new(SqliteOrdersService::new(db, policy)),
            policy,
        }
    }
}
