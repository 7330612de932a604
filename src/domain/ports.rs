use super::token::TokenData;
use super::value_objects::HashedPassword;
use crate::error::{AccountsError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use uuid::Uuid;

/// An aggregate root that can be persisted by a [`Repository`].
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human readable kind, used in error messages.
    const KIND: &'static str;
    /// Storage collection (column family, table) name.
    const COLLECTION: &'static str;

    type Filter: Filter<Self>;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Typed replacement for ad-hoc key/value query filters.
pub trait Filter<T>: Clone + Debug + Default + Send + Sync {
    fn matches(&self, entity: &T) -> bool;
    fn is_empty(&self) -> bool;

    /// Rejects empty filters for operations that must target specific records.
    fn require(&self, operation: &str) -> Result<()> {
        if self.is_empty() {
            return Err(AccountsError::Validation(format!(
                "Filters are required for {operation}"
            )));
        }
        Ok(())
    }
}

/// Pagination window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 100;
    pub const MAX_LIMIT: usize = 1000;

    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Result<Self> {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err(AccountsError::Validation(format!(
                "limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(Self {
            limit,
            offset: offset.unwrap_or(0),
        })
    }

    /// Orders entities by creation time (id breaks ties) and cuts the window.
    pub fn apply<T: Entity>(&self, mut entities: Vec<T>) -> Vec<T> {
        entities.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        entities
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn save(&self, entity: T) -> Result<T>;

    async fn bulk_save(&self, entities: Vec<T>) -> Result<Vec<T>> {
        let mut saved = Vec::with_capacity(entities.len());
        for entity in entities {
            saved.push(self.save(entity).await?);
        }
        Ok(saved)
    }

    /// Fails with [`AccountsError::NotFound`] when no entity has this id.
    async fn get(&self, id: Uuid) -> Result<T>;

    async fn find_one(&self, filter: &T::Filter) -> Result<Option<T>>;

    async fn exists(&self, filter: &T::Filter) -> Result<bool> {
        Ok(self.find_one(filter).await?.is_some())
    }

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn bulk_delete(&self, filter: &T::Filter) -> Result<usize>;

    async fn list_all(&self, page: Page, filter: &T::Filter) -> Result<Vec<T>>;

    async fn count(&self, filter: &T::Filter) -> Result<usize>;
}

pub type SharedRepository<T> = Arc<dyn Repository<T>>;

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<HashedPassword>;
    fn verify(&self, password: &str, hashed: &HashedPassword) -> Result<bool>;
    /// Whether the hash was produced with parameters other than the current ones.
    fn needs_rehash(&self, hashed: &HashedPassword) -> Result<bool>;
    fn algorithm(&self) -> &'static str;
}

pub trait TokenManager: Send + Sync {
    fn issue(&self, data: &TokenData) -> Result<String>;
    /// Fails with `ExpiredToken` or `InvalidToken`.
    fn decode(&self, token: &str) -> Result<TokenData>;
    fn refresh(&self, token: &str, expires_in: Option<Duration>) -> Result<String>;
    fn verify(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }
    fn default_expiration(&self) -> Duration {
        Duration::minutes(15)
    }
}

pub type SharedPasswordHasher = Arc<dyn PasswordHasher>;
pub type SharedTokenManager = Arc<dyn TokenManager>;
