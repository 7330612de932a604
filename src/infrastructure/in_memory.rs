use crate::domain::ports::{Entity, Filter, Page, Repository};
use crate::error::{AccountsError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory repository for any aggregate.
///
/// Uses `Arc<RwLock<HashMap<Uuid, T>>>` to allow shared concurrent access.
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct InMemoryRepository<T> {
    items: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> InMemoryRepository<T> {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn save(&self, entity: T) -> Result<T> {
        let mut items = self.items.write().await;
        items.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn bulk_save(&self, entities: Vec<T>) -> Result<Vec<T>> {
        let mut items = self.items.write().await;
        for entity in &entities {
            items.insert(entity.id(), entity.clone());
        }
        Ok(entities)
    }

    async fn get(&self, id: Uuid) -> Result<T> {
        let items = self.items.read().await;
        items
            .get(&id)
            .cloned()
            .ok_or_else(|| AccountsError::not_found(T::KIND, id))
    }

    async fn find_one(&self, filter: &T::Filter) -> Result<Option<T>> {
        filter.require("find_one")?;
        let items = self.items.read().await;
        Ok(items.values().find(|e| filter.matches(e)).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut items = self.items.write().await;
        items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AccountsError::not_found(T::KIND, id))
    }

    async fn bulk_delete(&self, filter: &T::Filter) -> Result<usize> {
        filter.require("bulk delete")?;
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|_, e| !filter.matches(e));
        Ok(before - items.len())
    }

    async fn list_all(&self, page: Page, filter: &T::Filter) -> Result<Vec<T>> {
        let items = self.items.read().await;
        let matching = items.values().filter(|e| filter.matches(e)).cloned().collect();
        Ok(page.apply(matching))
    }

    async fn count(&self, filter: &T::Filter) -> Result<usize> {
        let items = self.items.read().await;
        Ok(items.values().filter(|e| filter.matches(e)).count())
    }
}
