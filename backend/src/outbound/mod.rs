//! Driven adapters implementing the domain ports.

pub mod identity;
pub mod prediction;
pub mod store;

pub use identity::InMemoryIdentityProvider;
pub use prediction::{HttpRiskPredictor, DEFAULT_PREDICT_ENDPOINT, SECTOR_LABEL};
pub use store::InMemoryDocumentStore;
