//! Port abstraction for the users collection of the document store.

use async_trait::async_trait;

use crate::domain::user::{AccountProfile, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum ProfilePersistenceError {
        /// Write or read failed during execution.
        Query { message: String } => "profile store query failed: {message}",
    }
}

/// Port for the sign-up profile document keyed by user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Write the sign-up profile document.
    async fn create(&self, profile: &AccountProfile) -> Result<(), ProfilePersistenceError>;

    /// Fetch a profile by its owning user id.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccountProfile>, ProfilePersistenceError>;
}
