//! Shared WebSocket adapter state.
//!
//! The feed entry point depends on the repository port only, keeping the
//! connection loop testable with deterministic doubles.

use std::sync::Arc;

use crate::domain::ports::SupplierRepository;

/// Dependency bundle for the live supplier feed.
#[derive(Clone)]
pub struct WsState {
    pub suppliers: Arc<dyn SupplierRepository>,
}

impl WsState {
    /// Construct state from an explicit port implementation.
    pub fn new(suppliers: Arc<dyn SupplierRepository>) -> Self {
        Self { suppliers }
    }
}
