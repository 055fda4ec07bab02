//! Authentication primitives such as sign-in credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to the identity port.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{EmailAddress, UserValidationError};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or malformed.
    InvalidEmail(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated email/password pair used by the identity provider port.
///
/// ## Invariants
/// - `email` satisfies [`EmailAddress`] validation.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let email = EmailAddress::new(email).map_err(CredentialsValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email address used for account lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
