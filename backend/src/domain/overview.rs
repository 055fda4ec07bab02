//! Overview summary derived from the in-memory supplier sequence.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::supplier::{RiskBand, SupplierRecord};

/// Counts per risk category for the currently loaded record set.
///
/// Pure derivation with no independent state; callers recompute it whenever
/// the loaded sequence changes. `total` always equals the sum of the four
/// category counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    pub total: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    /// Records whose band is unrecognised or missing.
    pub unclassified: usize,
}

impl OverviewSummary {
    /// Derive the summary from a record sequence.
    pub fn from_records(records: &[SupplierRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            high_risk: 0,
            medium_risk: 0,
            low_risk: 0,
            unclassified: 0,
        };
        for record in records {
            match record.predicted_risk {
                Some(RiskBand::High) => summary.high_risk += 1,
                Some(RiskBand::Medium) => summary.medium_risk += 1,
                Some(RiskBand::Low) => summary.low_risk += 1,
                None => summary.unclassified += 1,
            }
        }
        summary
    }
}
