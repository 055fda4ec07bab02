//! In-memory email/password identity provider.
//!
//! Local stand-in for the hosted identity service. Registrations live only
//! for the process lifetime, which is enough for the session-cookie flow the
//! HTTP adapter builds on top of it.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::auth::Credentials;
use crate::domain::ports::{
    Identity, IdentityProvider, IdentityProviderError, PROVIDER_MESSAGE_PREFIX,
};
use crate::domain::user::UserId;

struct StoredIdentity {
    user_id: UserId,
    password: Zeroizing<String>,
}

/// Process-local identity registry keyed by normalised email.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    identities: RwLock<HashMap<String, StoredIdentity>>,
}

impl InMemoryIdentityProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }
}

fn rejected(detail: &str) -> IdentityProviderError {
    IdentityProviderError::rejected(format!("{PROVIDER_MESSAGE_PREFIX}{detail}"))
}

fn invalid_credentials() -> IdentityProviderError {
    IdentityProviderError::invalid_credentials(format!(
        "{PROVIDER_MESSAGE_PREFIX}invalid email or password"
    ))
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials) -> Result<Identity, IdentityProviderError> {
        let mut identities = self
            .identities
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let key = credentials.email().as_ref().to_owned();
        if identities.contains_key(&key) {
            return Err(rejected("email address is already in use"));
        }
        let user_id = UserId::random();
        identities.insert(
            key,
            StoredIdentity {
                user_id: user_id.clone(),
                password: Zeroizing::new(credentials.password().to_owned()),
            },
        );
        Ok(Identity {
            user_id,
            email: credentials.email().clone(),
        })
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Identity, IdentityProviderError> {
        let identities = self
            .identities
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let stored = identities
            .get(credentials.email().as_ref())
            .ok_or_else(invalid_credentials)?;
        if stored.password.as_str() != credentials.password() {
            return Err(invalid_credentials());
        }
        Ok(Identity {
            user_id: stored.user_id.clone(),
            email: credentials.email().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(email, password).expect("valid credentials")
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trips_the_identity() {
        let provider = InMemoryIdentityProvider::new();
        let creds = credentials("buyer@acme.example", "correct horse battery");

        let registered = provider.sign_up(&creds).await.expect("sign up");
        let signed_in = provider.sign_in(&creds).await.expect("sign in");
        assert_eq!(signed_in, registered);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_with_a_prefixed_message() {
        let provider = InMemoryIdentityProvider::new();
        let creds = credentials("buyer@acme.example", "pw-one-two-three");
        provider.sign_up(&creds).await.expect("first sign up");

        let err = provider
            .sign_up(&credentials("buyer@acme.example", "another password"))
            .await
            .expect_err("duplicate sign up must fail");
        assert!(matches!(err, IdentityProviderError::Rejected { .. }));
        assert_eq!(
            err.to_string(),
            "identity: email address is already in use"
        );
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let provider = InMemoryIdentityProvider::new();
        provider
            .sign_up(&credentials("buyer@acme.example", "right password"))
            .await
            .expect("sign up");

        let wrong_password = provider
            .sign_in(&credentials("buyer@acme.example", "wrong password"))
            .await
            .expect_err("wrong password must fail");
        let unknown_email = provider
            .sign_in(&credentials("nobody@acme.example", "right password"))
            .await
            .expect_err("unknown email must fail");

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(
            wrong_password,
            IdentityProviderError::InvalidCredentials { .. }
        ));
    }
}
