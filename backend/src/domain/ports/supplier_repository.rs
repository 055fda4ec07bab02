//! Port abstraction for the suppliers collection of the document store.
//!
//! Beyond plain reads and writes the port exposes a change-notification
//! channel: every insert or delete bumps a revision observable through
//! [`SupplierRepository::watch`]. Subscribers re-materialise the full
//! owner-scoped snapshot on each change rather than applying patches, and
//! dropping the receiver tears the registration down.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::supplier::{NewSupplierRecord, SupplierId, SupplierRecord};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by supplier repository adapters.
    pub enum SupplierPersistenceError {
        /// No record with the given id belongs to the owner.
        NotFound { message: String } => "supplier not found: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "supplier store query failed: {message}",
    }
}

/// Monotonic store revision carried by the change-notification channel.
pub type StoreRevision = u64;

/// Port for supplier record persistence and live change notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    /// Persist a predicted supplier payload; the store assigns the record id.
    async fn insert(
        &self,
        record: NewSupplierRecord,
    ) -> Result<SupplierRecord, SupplierPersistenceError>;

    /// Delete a record by id, verifying it belongs to the owner.
    async fn delete(
        &self,
        owner_id: &UserId,
        id: SupplierId,
    ) -> Result<(), SupplierPersistenceError>;

    /// List the owner's records sorted by creation time descending.
    async fn list_for_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<SupplierRecord>, SupplierPersistenceError>;

    /// Subscribe to store change notifications.
    fn watch(&self) -> watch::Receiver<StoreRevision>;
}
