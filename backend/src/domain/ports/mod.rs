//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod profile_repository;
mod risk_predictor;
mod supplier_repository;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    Identity, IdentityProvider, IdentityProviderError, PROVIDER_MESSAGE_PREFIX,
};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfilePersistenceError, ProfileRepository};
#[cfg(test)]
pub use risk_predictor::MockRiskPredictor;
pub use risk_predictor::{FixtureRiskPredictor, RiskPrediction, RiskPredictionError, RiskPredictor};
#[cfg(test)]
pub use supplier_repository::MockSupplierRepository;
pub use supplier_repository::{StoreRevision, SupplierPersistenceError, SupplierRepository};
