use super::blocking;
use crate::domain::ports::{SharedPasswordHasher, SharedRepository, SharedTokenManager};
use crate::domain::token::TokenData;
use crate::domain::user::{User, UserFilter};
use crate::domain::value_objects::Email;
use crate::error::{AccountsError, Result};
use chrono::Duration;

/// Credential checks and access-token handling.
#[derive(Clone)]
pub struct AuthService {
    users: SharedRepository<User>,
    hasher: SharedPasswordHasher,
    tokens: SharedTokenManager,
    access_token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: SharedRepository<User>,
        hasher: SharedPasswordHasher,
        tokens: SharedTokenManager,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            access_token_ttl,
        }
    }

    /// Checks credentials. Fails with `NotFound` for an unknown email,
    /// `Authentication` for a wrong password and `InactiveUser` otherwise.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| AccountsError::not_found("User", email))?;

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let stored = user.hashed_password.clone();
        let verified = blocking(move || hasher.verify(&password, &stored)).await?;
        if !verified {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(AccountsError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        if !user.is_active() {
            return Err(AccountsError::InactiveUser);
        }
        Ok(user)
    }

    pub fn create_access_token(&self, user: &User) -> Result<String> {
        self.tokens
            .issue(&TokenData::create(user, self.access_token_ttl))
    }

    /// Resolves the bearer of `token` and records the login.
    pub async fn get_logged_in_user(&self, token: &str) -> Result<User> {
        let data = self.tokens.decode(token)?;
        let mut user = self
            .find_by_email(data.email.as_str())
            .await?
            .ok_or_else(|| AccountsError::not_found("User", &data.email))?;

        if user.id != data.user_id {
            return Err(AccountsError::InvalidToken(
                "Token user ID mismatch".to_string(),
            ));
        }
        if !user.is_active() {
            return Err(AccountsError::InactiveUser);
        }

        user.record_login();
        self.users.save(user).await
    }

    pub fn refresh_access_token(&self, token: &str) -> Result<String> {
        self.tokens.refresh(token, Some(self.access_token_ttl))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = match Email::parse(email) {
            Ok(email) => email,
            Err(_) => return Ok(None),
        };
        let filter = UserFilter {
            email: Some(email),
            ..Default::default()
        };
        self.users.find_one(&filter).await
    }
}
