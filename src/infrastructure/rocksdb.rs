use crate::domain::merchant::Merchant;
use crate::domain::organization::Organization;
use crate::domain::ports::{Entity, Filter, Page, Repository};
use crate::domain::user::User;
use crate::error::{AccountsError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column families, one per aggregate collection.
pub const COLUMN_FAMILIES: [&str; 3] = [
    Organization::COLLECTION,
    Merchant::COLLECTION,
    User::COLLECTION,
];

/// A persistent store implementation using RocksDB.
///
/// Each aggregate lives in its own column family, keyed by the 16 UUID bytes,
/// with JSON-encoded values. Queries other than by id scan the family.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// column families when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = COLUMN_FAMILIES
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()));

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;
        tracing::debug!(path = %db.path().display(), "opened rocksdb store");

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            AccountsError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn scan<T: Entity>(&self, filter: &T::Filter) -> Result<Vec<T>> {
        let cf = self.cf(T::COLLECTION)?;
        let mut matching = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let entity: T = serde_json::from_slice(&value)?;
            if filter.matches(&entity) {
                matching.push(entity);
            }
        }
        Ok(matching)
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for RocksDBStore {
    async fn save(&self, entity: T) -> Result<T> {
        let cf = self.cf(T::COLLECTION)?;
        let value = serde_json::to_vec(&entity)?;
        self.db.put_cf(&cf, entity.id().as_bytes(), value)?;
        Ok(entity)
    }

    async fn get(&self, id: Uuid) -> Result<T> {
        let cf = self.cf(T::COLLECTION)?;
        match self.db.get_pinned_cf(&cf, id.as_bytes())? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Err(AccountsError::not_found(T::KIND, id)),
        }
    }

    async fn find_one(&self, filter: &T::Filter) -> Result<Option<T>> {
        filter.require("find_one")?;
        Ok(self.scan::<T>(filter)?.into_iter().next())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let cf = self.cf(T::COLLECTION)?;
        if self.db.get_pinned_cf(&cf, id.as_bytes())?.is_none() {
            return Err(AccountsError::not_found(T::KIND, id));
        }
        self.db.delete_cf(&cf, id.as_bytes())?;
        Ok(())
    }

    async fn bulk_delete(&self, filter: &T::Filter) -> Result<usize> {
        filter.require("bulk delete")?;
        let doomed = self.scan::<T>(filter)?;
        let cf = self.cf(T::COLLECTION)?;
        for entity in &doomed {
            self.db.delete_cf(&cf, entity.id().as_bytes())?;
        }
        Ok(doomed.len())
    }

    async fn list_all(&self, page: Page, filter: &T::Filter) -> Result<Vec<T>> {
        Ok(page.apply(self.scan::<T>(filter)?))
    }

    async fn count(&self, filter: &T::Filter) -> Result<usize> {
        Ok(self.scan::<T>(filter)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::organization::OrganizationFilter;
    use crate::domain::user::UserFilter;
    use crate::domain::value_objects::{DomainName, Email, HashedPassword, OrganizationName};
    use tempfile::tempdir;

    fn org(domain: &str) -> Organization {
        Organization::new(
            OrganizationName::parse("Acme").unwrap(),
            DomainName::parse(domain).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");

        for name in COLUMN_FAMILIES {
            assert!(store.db.cf_handle(name).is_some());
        }
    }

    #[tokio::test]
    async fn test_rocksdb_organization_store() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let acme = org("acme.com");
        Repository::<Organization>::save(&store, acme.clone())
            .await
            .unwrap();

        let retrieved = Repository::<Organization>::get(&store, acme.id).await.unwrap();
        assert_eq!(retrieved, acme);

        let filter = OrganizationFilter {
            domain: Some(DomainName::parse("ACME.com").unwrap()),
            ..Default::default()
        };
        let found = Repository::<Organization>::find_one(&store, &filter)
            .await
            .unwrap();
        assert_eq!(found.map(|o| o.id), Some(acme.id));

        let missing = Repository::<Organization>::get(&store, Uuid::new_v4()).await;
        assert!(matches!(missing, Err(AccountsError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_rocksdb_reopen_recovers_state() {
        let dir = tempdir().unwrap();
        let user = User::new(
            Email::parse("jane@acme.com").unwrap(),
            Uuid::new_v4(),
            HashedPassword::new("$argon2id$hash"),
            None,
        )
        .unwrap();

        {
            let store = RocksDBStore::open(dir.path()).unwrap();
            store.save(user.clone()).await.unwrap();
        }

        let store = RocksDBStore::open(dir.path()).unwrap();
        let filter = UserFilter {
            organization_id: Some(user.organization_id),
            ..Default::default()
        };
        let users = Repository::<User>::list_all(&store, Page::default(), &filter)
            .await
            .unwrap();
        assert_eq!(users, vec![user.clone()]);

        Repository::<User>::delete(&store, user.id).await.unwrap();
        assert_eq!(Repository::<User>::count(&store, &filter).await.unwrap(), 0);
    }
}
