//! Account onboarding and sign-in orchestration.
//!
//! Sign-up is two writes against two external collaborators: identity
//! creation at the provider, then the profile document in the users
//! collection. There is no transaction across the pair; a profile failure is
//! reported to the caller but the identity stays created.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::domain::auth::Credentials;
use crate::domain::ports::{
    Identity, IdentityProvider, IdentityProviderError, ProfilePersistenceError, ProfileRepository,
};
use crate::domain::user::{AccountProfile, OrganisationName};

/// Errors raised by account onboarding and sign-in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Identity(#[from] IdentityProviderError),
    /// The identity exists but its profile document could not be written.
    #[error("profile write failed after identity creation: {0}")]
    Profile(ProfilePersistenceError),
}

/// Use-case service wrapping the identity provider and profile store ports.
#[derive(Clone)]
pub struct AccountService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
}

impl AccountService {
    /// Construct the service from its ports.
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { identity, profiles }
    }

    /// Register a new identity and write its profile document.
    ///
    /// Onboarding only counts as successful once both writes land, but the
    /// identity creation is not rolled back when the profile write fails.
    pub async fn sign_up(
        &self,
        credentials: &Credentials,
        org_name: OrganisationName,
    ) -> Result<Identity, AccountError> {
        let identity = self.identity.sign_up(credentials).await?;
        let profile = AccountProfile {
            user_id: identity.user_id.clone(),
            email: identity.email.clone(),
            org_name,
            created_at: Utc::now(),
        };
        if let Err(error) = self.profiles.create(&profile).await {
            warn!(
                user_id = %identity.user_id,
                error = %error,
                "profile write failed; identity remains created"
            );
            return Err(AccountError::Profile(error));
        }
        Ok(identity)
    }

    /// Authenticate existing credentials.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, AccountError> {
        Ok(self.identity.sign_in(credentials).await?)
    }
}
