use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};
use crate::validation::{FieldErrors, SignupCandidate, USERNAME_TAKEN};

/// Form-level error key for failures not tied to one field.
pub const NON_FIELD_ERRORS: &str = "__all__";

pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Submitted signup or login form.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_in: i64,
}

/// Account registration and login.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub async fn signup(&self, form: Credentials) -> Result<User, DomainError> {
        let username = form.username.trim();
        let username_taken =
            !username.is_empty() && self.users.find_by_username(username).await?.is_some();

        SignupCandidate {
            username,
            password: &form.password,
            username_taken,
        }
        .validate()
        .map_err(|errors| {
            tracing::debug!(%errors, "Signup rejected");
            DomainError::Validation(errors)
        })?;

        let password_hash = self.passwords.hash(&form.password)?;
        let user = self
            .users
            .create(User::new(username.to_string(), password_hash))
            .await
            .map_err(|e| match e {
                RepoError::Unique(_) => {
                    DomainError::Validation(FieldErrors::single("username", USERNAME_TAKEN))
                }
                other => DomainError::Repo(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and issue an access token.
    pub async fn login(&self, form: Credentials) -> Result<Session, DomainError> {
        let user = self.users.find_by_username(form.username.trim()).await?;

        let user = match user {
            Some(user) if self.passwords.verify(&form.password, &user.password_hash)? => user,
            _ => {
                tracing::warn!(username = %form.username, "Failed login attempt");
                return Err(DomainError::Validation(FieldErrors::single(
                    NON_FIELD_ERRORS,
                    INVALID_LOGIN,
                )));
            }
        };

        let token = self.tokens.generate_token(user.id, &user.username)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            expires_in: self.tokens.expiration_seconds(),
            token,
            user,
        })
    }
}
