//! Supplier intake orchestration: predict, then persist.
//!
//! One attempt per submission, no retry or backoff. A prediction failure
//! aborts before anything is written; a persistence failure after a
//! successful prediction loses the prediction but never leaves a partial
//! record behind. The caller resubmits manually.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::ports::{
    RiskPredictionError, RiskPredictor, SupplierPersistenceError, SupplierRepository,
};
use crate::domain::supplier::{NewSupplierRecord, SupplierDraft, SupplierRecord};
use crate::domain::user::UserId;

/// Errors raised while submitting a supplier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupplierIntakeError {
    #[error(transparent)]
    Prediction(#[from] RiskPredictionError),
    #[error(transparent)]
    Persistence(#[from] SupplierPersistenceError),
}

/// Use-case service driving the intake pipeline.
#[derive(Clone)]
pub struct SupplierIntakeService {
    predictor: Arc<dyn RiskPredictor>,
    suppliers: Arc<dyn SupplierRepository>,
}

impl SupplierIntakeService {
    /// Construct the service from its ports.
    pub fn new(predictor: Arc<dyn RiskPredictor>, suppliers: Arc<dyn SupplierRepository>) -> Self {
        Self {
            predictor,
            suppliers,
        }
    }

    /// Submit one validated draft: obtain a prediction, then persist.
    pub async fn submit(
        &self,
        owner_id: &UserId,
        draft: SupplierDraft,
    ) -> Result<SupplierRecord, SupplierIntakeError> {
        debug!(supplier = %draft.attributes().name, "requesting risk prediction");
        let prediction = self.predictor.predict(draft.attributes()).await?;
        debug!(risk = %prediction.band, "prediction received; persisting supplier");

        let (attributes, coordinates) = draft.into_parts();
        let record = self
            .suppliers
            .insert(NewSupplierRecord {
                owner_id: owner_id.clone(),
                created_at: Utc::now(),
                attributes,
                coordinates,
                predicted_risk: prediction.band,
                confidence_scores: prediction.confidence_scores,
            })
            .await?;
        Ok(record)
    }
}

/// Status line reported after a successful submission.
pub fn success_message(record: &SupplierRecord) -> String {
    let risk = record
        .predicted_risk
        .map_or_else(|| "N/A".to_owned(), |band| band.as_str().to_uppercase());
    format!(
        "Supplier \"{}\" added with a risk of: {risk}",
        record.attributes.name
    )
}
