//! Supplier data model: intake drafts, persisted records, and risk bands.
//!
//! The predict-then-persist ordering is encoded in the types: a
//! [`NewSupplierRecord`] cannot be built without a [`RiskBand`], while records
//! read back from the store tolerate an unrecognised or missing band.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Countries offered by the intake form.
pub const COUNTRIES: [&str; 9] = [
    "Pakistan",
    "China",
    "Bangladesh",
    "India",
    "Turkey",
    "Vietnam",
    "USA",
    "Brazil",
    "Morocco",
];

/// Industry verticals offered by the intake form.
pub const INDUSTRY_VERTICALS: [&str; 7] = [
    "Dyeing & Finishing",
    "Spinning Mill",
    "Weaving & Knitting",
    "Garment Manufacturing",
    "Printing",
    "Packaging",
    "Logistics",
];

/// Default country preselected by the intake form.
pub const DEFAULT_COUNTRY: &str = "India";
/// Default industry vertical preselected by the intake form.
pub const DEFAULT_INDUSTRY_VERTICAL: &str = "Garment Manufacturing";

/// Store-assigned supplier record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SupplierId(Uuid);

impl SupplierId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SupplierId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Categorical risk output of the external prediction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RiskBand {
    High,
    Medium,
    Low,
}

impl RiskBand {
    /// Canonical wire label for the band.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a risk label is not one of the three known bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRiskBand(pub String);

impl fmt::Display for UnknownRiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown risk band: {}", self.0)
    }
}

impl std::error::Error for UnknownRiskBand {}

impl FromStr for RiskBand {
    type Err = UnknownRiskBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            other => Err(UnknownRiskBand(other.to_owned())),
        }
    }
}

/// Badge colour for the supplier list, a pure function of the risk band.
///
/// Exactly four outcomes: red for `High`, amber for `Medium`, green for
/// `Low`, and gray for anything unrecognised or missing.
pub fn risk_badge_colour(risk: Option<RiskBand>) -> &'static str {
    match risk {
        Some(RiskBand::High) => "red",
        Some(RiskBand::Medium) => "amber",
        Some(RiskBand::Low) => "green",
        None => "gray",
    }
}

/// Worker-count bucket captured by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum WorkerBucket {
    #[serde(rename = "1-50")]
    UpTo50,
    #[serde(rename = "51-200")]
    UpTo200,
    #[serde(rename = "201-500")]
    UpTo500,
    #[serde(rename = "501-1000")]
    UpTo1000,
    #[serde(rename = "1001-5000")]
    UpTo5000,
    #[serde(rename = "5001+")]
    Above5000,
}

impl WorkerBucket {
    /// All buckets, in the order offered by the intake form.
    pub const ALL: [Self; 6] = [
        Self::UpTo50,
        Self::UpTo200,
        Self::UpTo500,
        Self::UpTo1000,
        Self::UpTo5000,
        Self::Above5000,
    ];

    /// Default bucket preselected by the intake form.
    pub const DEFAULT: Self = Self::UpTo200;

    /// Canonical wire label for the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpTo50 => "1-50",
            Self::UpTo200 => "51-200",
            Self::UpTo500 => "201-500",
            Self::UpTo1000 => "501-1000",
            Self::UpTo5000 => "1001-5000",
            Self::Above5000 => "5001+",
        }
    }
}

impl fmt::Display for WorkerBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WGS84 coordinates attached to a supplier site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Validation errors raised while building a supplier draft.
#[derive(Debug, Clone, PartialEq)]
pub enum SupplierValidationError {
    EmptyName,
    EmptyCountry,
    EmptyIndustryVertical,
    /// A numeric field was NaN or infinite and cannot travel as JSON.
    NonFiniteNumber { field: &'static str },
    CoordinatesOutOfRange,
}

impl fmt::Display for SupplierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "supplier name must not be empty"),
            Self::EmptyCountry => write!(f, "country must not be empty"),
            Self::EmptyIndustryVertical => write!(f, "industry vertical must not be empty"),
            Self::NonFiniteNumber { field } => {
                write!(f, "{field} must be a finite number")
            }
            Self::CoordinatesOutOfRange => {
                write!(f, "coordinates must be within WGS84 ranges")
            }
        }
    }
}

impl std::error::Error for SupplierValidationError {}

/// Supplier attributes shared by drafts, predictions, and persisted records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierAttributes {
    pub name: String,
    pub country: String,
    pub industry_vertical: String,
    pub number_of_workers: WorkerBucket,
    pub total_emissions_kg_co2e: f64,
    pub water_usage_m3: f64,
    pub turnover_rate_percent: f64,
    pub workplace_accidents_last_year: u32,
    pub has_anti_corruption_policy: bool,
    pub publishes_esg_report: bool,
    pub is_iso14001_certified: bool,
    pub is_sa8000_certified: bool,
}

/// Validated intake submission, ready for prediction and persistence.
///
/// JSON has no representation for NaN or infinity, so the constructor
/// rejects non-finite numbers up front rather than letting them reach the
/// prediction wire format; see the regression tests below.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierDraft {
    attributes: SupplierAttributes,
    coordinates: Option<Coordinates>,
}

impl SupplierDraft {
    /// Validate and construct a draft from intake attributes.
    pub fn try_new(
        attributes: SupplierAttributes,
        coordinates: Option<Coordinates>,
    ) -> Result<Self, SupplierValidationError> {
        if attributes.name.trim().is_empty() {
            return Err(SupplierValidationError::EmptyName);
        }
        if attributes.country.trim().is_empty() {
            return Err(SupplierValidationError::EmptyCountry);
        }
        if attributes.industry_vertical.trim().is_empty() {
            return Err(SupplierValidationError::EmptyIndustryVertical);
        }
        for (field, value) in [
            ("total_emissions_kg_co2e", attributes.total_emissions_kg_co2e),
            ("water_usage_m3", attributes.water_usage_m3),
            ("turnover_rate_percent", attributes.turnover_rate_percent),
        ] {
            if !value.is_finite() {
                return Err(SupplierValidationError::NonFiniteNumber { field });
            }
        }
        if let Some(coordinates) = coordinates {
            let lat_ok = (-90.0..=90.0).contains(&coordinates.lat);
            let lng_ok = (-180.0..=180.0).contains(&coordinates.lng);
            if !(lat_ok && lng_ok && coordinates.lat.is_finite() && coordinates.lng.is_finite()) {
                return Err(SupplierValidationError::CoordinatesOutOfRange);
            }
        }
        Ok(Self {
            attributes,
            coordinates,
        })
    }

    /// Attributes forwarded to the prediction service.
    pub fn attributes(&self) -> &SupplierAttributes {
        &self.attributes
    }

    /// Optional site coordinates; never forwarded to the predictor.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Split the draft into its parts for persistence.
    pub fn into_parts(self) -> (SupplierAttributes, Option<Coordinates>) {
        (self.attributes, self.coordinates)
    }
}

/// Payload persisted after a successful prediction; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplierRecord {
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub attributes: SupplierAttributes,
    pub coordinates: Option<Coordinates>,
    pub predicted_risk: RiskBand,
    pub confidence_scores: Option<Value>,
}

/// Supplier record as read back from the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: SupplierId,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub attributes: SupplierAttributes,
    pub coordinates: Option<Coordinates>,
    pub predicted_risk: Option<RiskBand>,
    pub confidence_scores: Option<Value>,
}

impl SupplierRecord {
    /// Materialise the record the store derives from an accepted insert.
    pub fn from_new(id: SupplierId, new: NewSupplierRecord) -> Self {
        Self {
            id,
            owner_id: new.owner_id,
            created_at: new.created_at,
            attributes: new.attributes,
            coordinates: new.coordinates,
            predicted_risk: Some(new.predicted_risk),
            confidence_scores: new.confidence_scores,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn attributes() -> SupplierAttributes {
        SupplierAttributes {
            name: "Jaipur Textiles".to_owned(),
            country: DEFAULT_COUNTRY.to_owned(),
            industry_vertical: DEFAULT_INDUSTRY_VERTICAL.to_owned(),
            number_of_workers: WorkerBucket::DEFAULT,
            total_emissions_kg_co2e: 1000.0,
            water_usage_m3: 500.0,
            turnover_rate_percent: 5.0,
            workplace_accidents_last_year: 0,
            has_anti_corruption_policy: false,
            publishes_esg_report: false,
            is_iso14001_certified: false,
            is_sa8000_certified: false,
        }
    }

    #[rstest]
    #[case("High", RiskBand::High)]
    #[case("Medium", RiskBand::Medium)]
    #[case("Low", RiskBand::Low)]
    fn parses_known_risk_bands(#[case] label: &str, #[case] expected: RiskBand) {
        let band: RiskBand = label.parse().expect("known label");
        assert_eq!(band, expected);
        assert_eq!(band.as_str(), label);
    }

    #[test]
    fn rejects_unknown_risk_labels() {
        let err = "Critical".parse::<RiskBand>().expect_err("unknown label");
        assert_eq!(err, UnknownRiskBand("Critical".to_owned()));
    }

    #[rstest]
    #[case(Some(RiskBand::High), "red")]
    #[case(Some(RiskBand::Medium), "amber")]
    #[case(Some(RiskBand::Low), "green")]
    #[case(None, "gray")]
    fn badge_colour_is_a_pure_function_of_the_band(
        #[case] risk: Option<RiskBand>,
        #[case] expected: &str,
    ) {
        assert_eq!(risk_badge_colour(risk), expected);
    }

    #[test]
    fn worker_buckets_serialise_to_form_labels() {
        let json = serde_json::to_string(&WorkerBucket::Above5000).expect("serialise bucket");
        assert_eq!(json, "\"5001+\"");
        let parsed: WorkerBucket = serde_json::from_str("\"51-200\"").expect("parse bucket");
        assert_eq!(parsed, WorkerBucket::UpTo200);
    }

    #[rstest]
    #[case("", SupplierValidationError::EmptyName)]
    #[case("   ", SupplierValidationError::EmptyName)]
    fn rejects_blank_names(#[case] name: &str, #[case] expected: SupplierValidationError) {
        let mut attrs = attributes();
        attrs.name = name.to_owned();
        let err = SupplierDraft::try_new(attrs, None).expect_err("blank name must fail");
        assert_eq!(err, expected);
    }

    // JSON has no NaN, so non-finite values are rejected at the boundary.
    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_non_finite_numeric_input(#[case] value: f64) {
        let mut attrs = attributes();
        attrs.water_usage_m3 = value;
        let err = SupplierDraft::try_new(attrs, None).expect_err("non-finite must fail");
        assert_eq!(
            err,
            SupplierValidationError::NonFiniteNumber {
                field: "water_usage_m3"
            }
        );
    }

    #[rstest]
    #[case(91.0, 0.0)]
    #[case(0.0, -181.0)]
    fn rejects_out_of_range_coordinates(#[case] lat: f64, #[case] lng: f64) {
        let err = SupplierDraft::try_new(attributes(), Some(Coordinates { lat, lng }))
            .expect_err("out-of-range coordinates must fail");
        assert_eq!(err, SupplierValidationError::CoordinatesOutOfRange);
    }

    #[test]
    fn records_from_accepted_inserts_always_carry_a_band() {
        let new = NewSupplierRecord {
            owner_id: UserId::random(),
            created_at: chrono::Utc::now(),
            attributes: attributes(),
            coordinates: None,
            predicted_risk: RiskBand::Low,
            confidence_scores: None,
        };
        let record = SupplierRecord::from_new(SupplierId::random(), new);
        assert_eq!(record.predicted_risk, Some(RiskBand::Low));
    }
}
