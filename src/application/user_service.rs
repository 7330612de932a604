use super::blocking;
use crate::domain::organization::Organization;
use crate::domain::parse_status;
use crate::domain::ports::{Page, SharedPasswordHasher, SharedRepository};
use crate::domain::user::{User, UserFilter, UserStatus};
use crate::domain::value_objects::{Email, Password};
use crate::error::{AccountsError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// User registration and lookup.
#[derive(Clone)]
pub struct UserService {
    users: SharedRepository<User>,
    organizations: SharedRepository<Organization>,
    hasher: SharedPasswordHasher,
    write_lock: Arc<Mutex<()>>,
}

impl UserService {
    pub fn new(
        users: SharedRepository<User>,
        organizations: SharedRepository<Organization>,
        hasher: SharedPasswordHasher,
    ) -> Self {
        Self {
            users,
            organizations,
            hasher,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Registers a user. Emails are unique across all organizations since
    /// login is by email alone.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        organization_id: Uuid,
        name: Option<&str>,
    ) -> Result<User> {
        let email = Email::parse(email)?;
        let password = Password::parse(password)?;
        self.organizations.get(organization_id).await?;

        let _guard = self.write_lock.lock().await;
        let by_email = UserFilter {
            email: Some(email.clone()),
            ..Default::default()
        };
        if self.users.exists(&by_email).await? {
            return Err(AccountsError::UserAlreadyExists(email.to_string()));
        }

        let hasher = self.hasher.clone();
        let hashed = blocking(move || hasher.hash(password.expose())).await?;
        let user = User::new(email, organization_id, hashed, name)?;
        let user = self.users.save(user).await?;
        tracing::info!(
            user_id = %user.id,
            organization_id = %organization_id,
            "user created"
        );
        Ok(user)
    }

    /// Fetches a user, optionally checking it belongs to `org_id`.
    pub async fn get_user(&self, org_id: Option<Uuid>, user_id: Uuid) -> Result<User> {
        let user = self.users.get(user_id).await?;
        match org_id {
            Some(org_id) if user.organization_id != org_id => {
                Err(AccountsError::not_found("User", user_id))
            }
            _ => Ok(user),
        }
    }

    pub async fn list_users(
        &self,
        org_id: Uuid,
        page: Page,
        status: Option<&str>,
    ) -> Result<(Vec<User>, usize)> {
        self.organizations.get(org_id).await?;
        let filter = UserFilter {
            organization_id: Some(org_id),
            status: status.map(parse_status::<UserStatus>).transpose()?,
            ..Default::default()
        };
        let users = self.users.list_all(page, &filter).await?;
        let total = self.users.count(&filter).await?;
        Ok((users, total))
    }
}
