//! User identity and account profile data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the constructors in this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    InvalidEmail,
    EmptyOrganisationName,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email address must not be empty"),
            Self::InvalidEmail => write!(f, "email address must contain a user and a domain"),
            Self::EmptyOrganisationName => write!(f, "organisation name must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier assigned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Email address normalised to lowercase.
///
/// ## Invariants
/// - trimmed, non-empty, and shaped `user@domain` with both parts non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match normalised.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => {
                Ok(Self(normalised))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Organisation name captured during sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct OrganisationName(String);

impl OrganisationName {
    /// Validate and construct an [`OrganisationName`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyOrganisationName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for OrganisationName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<OrganisationName> for String {
    fn from(value: OrganisationName) -> Self {
        value.0
    }
}

impl TryFrom<String> for OrganisationName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Profile document written to the users collection during sign-up.
///
/// The profile is keyed by the provider-assigned user id. Writing it is a
/// sign-up side effect with no transactional guarantee against the identity
/// creation; see [`crate::domain::accounts::AccountService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub org_name: OrganisationName,
    pub created_at: DateTime<Utc>,
}
