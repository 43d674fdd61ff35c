use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let RegisterUserCommand { username, password } = command;

        // The repository rejects duplicates on insert as well; this only
        // avoids hashing a password for a name that is obviously taken.
        if self.repository.find_by_username(&username).await?.is_some() {
            tracing::info!(username = %username, "Registration refused, username taken");
            return Err(UserError::DuplicateUser(username.to_string()));
        }

        // Argon2 is deliberately slow, keep it off the async workers
        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand, now: DateTime<Utc>) -> Result<String, UserError> {
        let LoginCommand { username, password } = command;

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::warn!(username = %username, "Login failed");
            return Err(UserError::InvalidCredentials);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let user_id = user.id;
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(
                &password,
                &user.password_hash,
                user.id,
                user.username.as_str(),
                now,
            )
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match result {
            Ok(token) => {
                tracing::info!(user_id = %user_id, "User signed in");
                Ok(token)
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(username = %username, "Login failed");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => {
                tracing::error!(error = %e, "Token signing failed");
                Err(UserError::Signing(e))
            }
        }
    }

    fn issue_token(&self, user: &User, now: DateTime<Utc>) -> Result<String, UserError> {
        self.authenticator
            .generate_token(user.id, user.username.as_str(), now)
            .map_err(UserError::Signing)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }
}
