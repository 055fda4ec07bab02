//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports, and remain testable without I/O.

use std::sync::Arc;

use crate::domain::accounts::AccountService;
use crate::domain::intake::SupplierIntakeService;
use crate::domain::ports::{ProfileRepository, SupplierRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub intake: SupplierIntakeService,
    pub suppliers: Arc<dyn SupplierRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl HttpState {
    /// Construct state from explicit service and port implementations.
    pub fn new(
        accounts: AccountService,
        intake: SupplierIntakeService,
        suppliers: Arc<dyn SupplierRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            accounts,
            intake,
            suppliers,
            profiles,
        }
    }
}
