//! Users service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::SqliteUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteUsersService {
    db: Db,
    repository: SqliteUsersRepository,
}

impl SqliteUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for SqliteUsersService {
    #[tracing::instrument(
        name = "users.service.create_user",
        skip(self, user),
        fields(user_uuid = %user.uuid),
        err
    )]
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let user = NewUser {
            username: user.username.trim().to_string(),
            email: normalise_email(&user.email),
            ..user
        };

        if user.username.is_empty() || user.email.is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, user, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!(user_uuid = %created.uuid, "created user");

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .get_user_by_email(&mut tx, &normalise_email(email))
            .await?;

        tx.commit().await?;

        Ok(user)
    }
}

fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Look a user up by email, ignoring case and surrounding whitespace.
    async fn get_user_by_email(&self, email: &str) -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            email: email.to_string(),
            phone_number: None,
        }
    }

    #[tokio::test]
    async fn create_user_returns_normalised_record() -> TestResult {
        let ctx = TestContext::new().await?;
        let user = new_user(" asha ", " Asha@Example.com ");
        let uuid = user.uuid;

        let created = ctx.users.create_user(user).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.username, "asha");
        assert_eq!(created.email, "asha@example.com");
        assert_eq!(created.created_at, created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn get_user_by_email_ignores_case() -> TestResult {
        let ctx = TestContext::new().await?;

        let created = ctx
            .users
            .create_user(new_user("ravi", "ravi@example.com"))
            .await?;

        let found = ctx.users.get_user_by_email("RAVI@example.com").await?;

        assert_eq!(found, created);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await?;

        ctx.users
            .create_user(new_user("meera", "meera@example.com"))
            .await?;

        let result = ctx
            .users
            .create_user(new_user("meera2", "Meera@example.com"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_username_is_rejected() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx.users.create_user(new_user("  ", "x@example.com")).await;

        assert!(
            matches!(result, Err(UsersServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
