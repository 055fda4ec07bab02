//! Wire DTOs for the prediction endpoint.
//!
//! Field names reproduce the service's contract exactly, including the
//! mixed-case `industryVertical` key and the two constant fields the request
//! always carries: `processing_type` restating the industry vertical and the
//! fixed `sector` label.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ports::RiskPrediction;
use crate::domain::supplier::{SupplierAttributes, UnknownRiskBand, WorkerBucket};

/// Fixed sector label sent with every prediction request.
pub const SECTOR_LABEL: &str = "Apparel";

#[derive(Debug, Serialize)]
pub(super) struct PredictionRequestDto<'a> {
    pub name: &'a str,
    pub country: &'a str,
    #[serde(rename = "industryVertical")]
    pub industry_vertical: &'a str,
    pub number_of_workers: WorkerBucket,
    pub total_emissions_kg_co2e: f64,
    pub water_usage_m3: f64,
    pub turnover_rate_percent: f64,
    pub workplace_accidents_last_year: u32,
    pub has_anti_corruption_policy: bool,
    pub publishes_esg_report: bool,
    pub is_iso14001_certified: bool,
    pub is_sa8000_certified: bool,
    pub processing_type: &'a str,
    pub sector: &'static str,
}

impl<'a> From<&'a SupplierAttributes> for PredictionRequestDto<'a> {
    fn from(attrs: &'a SupplierAttributes) -> Self {
        Self {
            name: &attrs.name,
            country: &attrs.country,
            industry_vertical: &attrs.industry_vertical,
            number_of_workers: attrs.number_of_workers,
            total_emissions_kg_co2e: attrs.total_emissions_kg_co2e,
            water_usage_m3: attrs.water_usage_m3,
            turnover_rate_percent: attrs.turnover_rate_percent,
            workplace_accidents_last_year: attrs.workplace_accidents_last_year,
            has_anti_corruption_policy: attrs.has_anti_corruption_policy,
            publishes_esg_report: attrs.publishes_esg_report,
            is_iso14001_certified: attrs.is_iso14001_certified,
            is_sa8000_certified: attrs.is_sa8000_certified,
            processing_type: &attrs.industry_vertical,
            sector: SECTOR_LABEL,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PredictionResponseDto {
    pub prediction: String,
    #[serde(rename = "confidenceScores", default)]
    pub confidence_scores: Option<Value>,
}

impl PredictionResponseDto {
    pub fn into_domain(self) -> Result<RiskPrediction, UnknownRiskBand> {
        Ok(RiskPrediction {
            band: self.prediction.parse()?,
            confidence_scores: self.confidence_scores,
        })
    }
}
