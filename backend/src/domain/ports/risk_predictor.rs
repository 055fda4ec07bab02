//! Driven port for the external risk-prediction service.
//!
//! The domain owns the request and response shapes so intake orchestration
//! stays adapter-agnostic. Coordinates are deliberately absent from the
//! request: the prediction service only sees intake attributes.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::supplier::{RiskBand, SupplierAttributes};

use super::define_port_error;

/// Risk classification returned by the prediction service.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskPrediction {
    /// Predicted risk band.
    pub band: RiskBand,
    /// Opaque per-band confidence scores, passed through unmodified.
    pub confidence_scores: Option<Value>,
}

define_port_error! {
    /// Errors surfaced while calling the prediction service.
    pub enum RiskPredictionError {
        /// Network transport failed before receiving a response.
        Transport { message: String } => "prediction transport failed: {message}",
        /// The service answered with a non-success status.
        Status { message: String } => "AI server error: {message}",
        /// The response body could not be decoded into a risk band.
        Decode { message: String } => "prediction response decode failed: {message}",
    }
}

/// Port for obtaining a risk prediction for one supplier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RiskPredictor: Send + Sync {
    /// Classify one supplier's intake attributes.
    async fn predict(
        &self,
        attributes: &SupplierAttributes,
    ) -> Result<RiskPrediction, RiskPredictionError>;
}

/// Fixture implementation classifying everything as low risk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRiskPredictor;

#[async_trait]
impl RiskPredictor for FixtureRiskPredictor {
    async fn predict(
        &self,
        _attributes: &SupplierAttributes,
    ) -> Result<RiskPrediction, RiskPredictionError> {
        Ok(RiskPrediction {
            band: RiskBand::Low,
            confidence_scores: None,
        })
    }
}
