//! Outbound adapter for the external risk-prediction service.

mod dto;
mod http_client;

pub use dto::SECTOR_LABEL;
pub use http_client::{HttpRiskPredictor, DEFAULT_PREDICT_ENDPOINT};
