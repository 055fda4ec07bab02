//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define the strongly typed supplier/account model used by the
//! adapters, the ports they implement, and the orchestration services that
//! keep predict-then-persist and sign-up sequencing out of the handlers.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod intake;
pub mod overview;
pub mod ports;
pub mod report;
pub mod supplier;
pub mod user;

pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::supplier::{
    Coordinates, RiskBand, SupplierAttributes, SupplierDraft, SupplierId, SupplierRecord,
    SupplierValidationError, WorkerBucket,
};
pub use self::user::{
    AccountProfile, EmailAddress, OrganisationName, UserId, UserValidationError,
};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, DomainError>;
