//! Application layer orchestrating the accounts use cases.
//!
//! Each service owns shared handles to the repositories and adapters it needs,
//! so cloning a service is cheap and every clone sees the same state.

pub mod auth_service;
pub mod merchant_service;
pub mod organization_service;
pub mod user_service;

use crate::domain::ports::{SharedPasswordHasher, SharedTokenManager};
use crate::error::{AccountsError, Result};
use crate::infrastructure::Stores;
use auth_service::AuthService;
use chrono::Duration;
use merchant_service::MerchantService;
use organization_service::OrganizationService;
use user_service::UserService;

/// All accounts services, wired on the same stores.
#[derive(Clone)]
pub struct Accounts {
    pub organizations: OrganizationService,
    pub merchants: MerchantService,
    pub users: UserService,
    pub auth: AuthService,
}

impl Accounts {
    pub fn new(
        stores: Stores,
        hasher: SharedPasswordHasher,
        tokens: SharedTokenManager,
        access_token_expire_minutes: i64,
    ) -> Self {
        Self {
            organizations: OrganizationService::new(stores.organizations.clone()),
            merchants: MerchantService::new(stores.merchants, stores.organizations.clone()),
            users: UserService::new(stores.users.clone(), stores.organizations, hasher.clone()),
            auth: AuthService::new(
                stores.users,
                hasher,
                tokens,
                Duration::minutes(access_token_expire_minutes),
            ),
        }
    }
}

/// Runs CPU-bound work (password hashing) off the async workers.
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AccountsError::InternalError(Box::new(e)))?
}
