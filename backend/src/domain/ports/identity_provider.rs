//! Driven port for the external identity provider.
//!
//! Sign-up and sign-in delegate entirely to the provider; the domain never
//! stores or compares passwords itself. Provider error messages are shown to
//! users verbatim apart from [`PROVIDER_MESSAGE_PREFIX`], which the HTTP
//! adapter strips.

use async_trait::async_trait;

use crate::domain::auth::Credentials;
use crate::domain::user::{EmailAddress, UserId};

use super::define_port_error;

/// Prefix identity adapters put on user-facing error messages.
pub const PROVIDER_MESSAGE_PREFIX: &str = "identity: ";

/// Authenticated identity returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned opaque user id.
    pub user_id: UserId,
    /// Email the identity was registered with.
    pub email: EmailAddress,
}

define_port_error! {
    /// Errors surfaced by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider refused to create the identity (e.g. email taken).
        Rejected { message: String } => "{message}",
        /// Credentials did not match a known identity.
        InvalidCredentials { message: String } => "{message}",
        /// The provider could not be reached or failed internally.
        Unavailable { message: String } => "{message}",
    }
}

/// Port for email/password identity operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new identity and return its provider-assigned id.
    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, IdentityProviderError>;

    /// Authenticate existing credentials.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, IdentityProviderError>;
}
