//! Adapters implementing the domain ports.

pub mod argon;
pub mod in_memory;
pub mod jwt;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

use crate::application::Accounts;
use crate::config::Settings;
use crate::domain::merchant::Merchant;
use crate::domain::organization::Organization;
use crate::domain::ports::SharedRepository;
use crate::domain::user::User;
use crate::error::Result;
use argon::Argon2PasswordHasher;
use in_memory::InMemoryRepository;
use jwt::JwtManager;
use std::path::Path;
use std::sync::Arc;

/// The repositories backing the accounts services.
#[derive(Clone)]
pub struct Stores {
    pub organizations: SharedRepository<Organization>,
    pub merchants: SharedRepository<Merchant>,
    pub users: SharedRepository<User>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            organizations: Arc::new(InMemoryRepository::new()),
            merchants: Arc::new(InMemoryRepository::new()),
            users: Arc::new(InMemoryRepository::new()),
        }
    }

    #[cfg(feature = "storage-rocksdb")]
    pub fn rocksdb<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = self::rocksdb::RocksDBStore::open(path)?;
        Ok(Self {
            organizations: Arc::new(store.clone()),
            merchants: Arc::new(store.clone()),
            users: Arc::new(store),
        })
    }

    /// Opens persistent storage when a path is given and the binary supports it,
    /// in-memory storage otherwise.
    pub fn open(db_path: Option<&Path>) -> Result<Self> {
        match db_path {
            #[cfg(feature = "storage-rocksdb")]
            Some(path) => Self::rocksdb(path),
            #[cfg(not(feature = "storage-rocksdb"))]
            Some(path) => {
                tracing::warn!(
                    path = %path.display(),
                    "persistent storage requested via --db-path, but the 'storage-rocksdb' feature is not enabled; falling back to in-memory storage"
                );
                Ok(Self::in_memory())
            }
            None => Ok(Self::in_memory()),
        }
    }
}

/// Builds the services from settings on top of the given stores.
pub fn build_accounts(settings: &Settings, stores: Stores) -> Result<Accounts> {
    if settings.jwt.uses_default_secret() {
        tracing::warn!("JWT_SECRET_KEY is not set; tokens are signed with the built-in default secret");
    }
    let hasher = Arc::new(Argon2PasswordHasher::new(&settings.hashing)?);
    let tokens = Arc::new(JwtManager::from_settings(&settings.jwt)?);
    Ok(Accounts::new(
        stores,
        hasher,
        tokens,
        settings.jwt.access_token_expire_minutes,
    ))
}
