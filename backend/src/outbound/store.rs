//! In-memory document store adapter.
//!
//! Stands in for the external document database behind the repository ports:
//! a `suppliers` collection with create/delete/list plus a change
//! notification channel, and a `users` collection for sign-up profiles. A
//! single process-wide instance gives every session the same view, so a
//! delete issued through one connection is observed by another through the
//! watch channel, exactly like the hosted store's snapshot listeners.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::ports::{
    ProfilePersistenceError, ProfileRepository, StoreRevision, SupplierPersistenceError,
    SupplierRepository,
};
use crate::domain::supplier::{NewSupplierRecord, SupplierId, SupplierRecord};
use crate::domain::user::{AccountProfile, UserId};

/// Process-wide in-memory document store.
pub struct InMemoryDocumentStore {
    suppliers: RwLock<Vec<SupplierRecord>>,
    profiles: RwLock<HashMap<UserId, AccountProfile>>,
    revision: watch::Sender<StoreRevision>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            suppliers: RwLock::new(Vec::new()),
            profiles: RwLock::new(HashMap::new()),
            revision,
        }
    }
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_suppliers(&self) -> RwLockReadGuard<'_, Vec<SupplierRecord>> {
        self.suppliers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_suppliers(&self) -> RwLockWriteGuard<'_, Vec<SupplierRecord>> {
        self.suppliers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

#[async_trait]
impl SupplierRepository for InMemoryDocumentStore {
    async fn insert(
        &self,
        record: NewSupplierRecord,
    ) -> Result<SupplierRecord, SupplierPersistenceError> {
        let record = SupplierRecord::from_new(SupplierId::random(), record);
        self.write_suppliers().push(record.clone());
        self.bump_revision();
        Ok(record)
    }

    async fn delete(
        &self,
        owner_id: &UserId,
        id: SupplierId,
    ) -> Result<(), SupplierPersistenceError> {
        let mut suppliers = self.write_suppliers();
        let position = suppliers
            .iter()
            .position(|record| record.id == id && record.owner_id == *owner_id)
            .ok_or_else(|| SupplierPersistenceError::not_found(id.to_string()))?;
        suppliers.remove(position);
        drop(suppliers);
        self.bump_revision();
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<SupplierRecord>, SupplierPersistenceError> {
        let mut records: Vec<_> = self
            .read_suppliers()
            .iter()
            .filter(|record| record.owner_id == *owner_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn watch(&self) -> watch::Receiver<StoreRevision> {
        self.revision.subscribe()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryDocumentStore {
    async fn create(&self, profile: &AccountProfile) -> Result<(), ProfilePersistenceError> {
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountProfile>, ProfilePersistenceError> {
        Ok(self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned())
    }
}
