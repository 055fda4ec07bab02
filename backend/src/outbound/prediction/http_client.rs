//! Reqwest-backed risk predictor adapter.
//!
//! This adapter owns transport details only: request serialisation, HTTP
//! error mapping, and JSON decoding into the domain prediction. There is no
//! request timeout beyond the transport defaults; submissions are bounded by
//! the caller giving up, matching the service's existing clients.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{PredictionRequestDto, PredictionResponseDto};
use crate::domain::ports::{RiskPrediction, RiskPredictionError, RiskPredictor};
use crate::domain::supplier::SupplierAttributes;

/// Default address of the locally hosted prediction service.
pub const DEFAULT_PREDICT_ENDPOINT: &str = "http://127.0.0.1:5001/predict";

/// Risk predictor adapter performing HTTP POST requests against one endpoint.
pub struct HttpRiskPredictor {
    client: Client,
    endpoint: Url,
}

impl HttpRiskPredictor {
    /// Build an adapter for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl RiskPredictor for HttpRiskPredictor {
    async fn predict(
        &self,
        attributes: &SupplierAttributes,
    ) -> Result<RiskPrediction, RiskPredictionError> {
        let payload = PredictionRequestDto::from(attributes);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_prediction(body.as_ref())
    }
}

fn map_transport_error(error: reqwest::Error) -> RiskPredictionError {
    RiskPredictionError::transport(error.to_string())
}

fn map_status_error(status: StatusCode) -> RiskPredictionError {
    RiskPredictionError::status(status.to_string())
}

fn parse_prediction(body: &[u8]) -> Result<RiskPrediction, RiskPredictionError> {
    let decoded: PredictionResponseDto = serde_json::from_slice(body)
        .map_err(|error| RiskPredictionError::decode(format!("invalid JSON payload: {error}")))?;
    decoded
        .into_domain()
        .map_err(|error| RiskPredictionError::decode(error.to_string()))
}
