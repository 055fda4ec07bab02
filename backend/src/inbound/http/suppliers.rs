//! Supplier API handlers.
//!
//! ```text
//! POST   /api/v1/suppliers              Submit a supplier for prediction and storage
//! GET    /api/v1/suppliers              Owner-scoped list, newest first
//! DELETE /api/v1/suppliers/{id}         Remove one record
//! GET    /api/v1/suppliers/{id}/report  Download the ESG report
//! GET    /api/v1/intake/options         Form option lists and defaults
//! ```

use actix_web::http::header;
use actix_web::{delete, get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::intake::{success_message, SupplierIntakeError};
use crate::domain::ports::SupplierPersistenceError;
use crate::domain::report::{build_report, render_html, report_filename};
use crate::domain::supplier::{
    risk_badge_colour, Coordinates, SupplierAttributes, SupplierDraft, SupplierId,
    SupplierRecord, SupplierValidationError, WorkerBucket, COUNTRIES, DEFAULT_COUNTRY,
    DEFAULT_INDUSTRY_VERTICAL, INDUSTRY_VERTICALS,
};
use crate::domain::DomainError;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Intake request body for `POST /api/v1/suppliers`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
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
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl IntakeRequest {
    fn into_draft(self) -> Result<SupplierDraft, SupplierValidationError> {
        let coordinates = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };
        SupplierDraft::try_new(
            SupplierAttributes {
                name: self.name,
                country: self.country,
                industry_vertical: self.industry_vertical,
                number_of_workers: self.number_of_workers,
                total_emissions_kg_co2e: self.total_emissions_kg_co2e,
                water_usage_m3: self.water_usage_m3,
                turnover_rate_percent: self.turnover_rate_percent,
                workplace_accidents_last_year: self.workplace_accidents_last_year,
                has_anti_corruption_policy: self.has_anti_corruption_policy,
                publishes_esg_report: self.publishes_esg_report,
                is_iso14001_certified: self.is_iso14001_certified,
                is_sa8000_certified: self.is_sa8000_certified,
            },
            coordinates,
        )
    }
}

/// Supplier record payload returned by the list and create endpoints.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub predicted_risk: Option<String>,
    /// List badge colour, a pure function of the risk band.
    pub risk_badge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_scores: Option<Value>,
}

impl From<&SupplierRecord> for SupplierResponse {
    fn from(record: &SupplierRecord) -> Self {
        let attrs = &record.attributes;
        Self {
            id: *record.id.as_uuid(),
            created_at: record.created_at,
            name: attrs.name.clone(),
            country: attrs.country.clone(),
            industry_vertical: attrs.industry_vertical.clone(),
            number_of_workers: attrs.number_of_workers,
            total_emissions_kg_co2e: attrs.total_emissions_kg_co2e,
            water_usage_m3: attrs.water_usage_m3,
            turnover_rate_percent: attrs.turnover_rate_percent,
            workplace_accidents_last_year: attrs.workplace_accidents_last_year,
            has_anti_corruption_policy: attrs.has_anti_corruption_policy,
            publishes_esg_report: attrs.publishes_esg_report,
            is_iso14001_certified: attrs.is_iso14001_certified,
            is_sa8000_certified: attrs.is_sa8000_certified,
            lat: record.coordinates.map(|c| c.lat),
            lng: record.coordinates.map(|c| c.lng),
            predicted_risk: record.predicted_risk.map(|band| band.as_str().to_owned()),
            risk_badge: risk_badge_colour(record.predicted_risk).to_owned(),
            confidence_scores: record.confidence_scores.clone(),
        }
    }
}

/// Response body for a successful intake submission.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    /// Status line naming the supplier and its upper-cased risk band.
    pub message: String,
    pub supplier: SupplierResponse,
}

/// Form option lists served to intake clients.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntakeOptions {
    pub countries: Vec<&'static str>,
    pub industry_verticals: Vec<&'static str>,
    pub worker_buckets: Vec<WorkerBucket>,
    pub default_country: &'static str,
    pub default_industry_vertical: &'static str,
    pub default_worker_bucket: WorkerBucket,
}

fn map_validation_error(err: SupplierValidationError) -> DomainError {
    let field = match &err {
        SupplierValidationError::EmptyName => "name",
        SupplierValidationError::EmptyCountry => "country",
        SupplierValidationError::EmptyIndustryVertical => "industryVertical",
        SupplierValidationError::NonFiniteNumber { field } => field,
        SupplierValidationError::CoordinatesOutOfRange => "coordinates",
    };
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn map_intake_error(err: SupplierIntakeError) -> DomainError {
    match err {
        SupplierIntakeError::Prediction(prediction) => {
            DomainError::service_unavailable(prediction.to_string())
        }
        SupplierIntakeError::Persistence(persistence) => map_persistence_error(persistence),
    }
}

fn map_persistence_error(err: SupplierPersistenceError) -> DomainError {
    match &err {
        SupplierPersistenceError::NotFound { .. } => DomainError::not_found(err.to_string()),
        SupplierPersistenceError::Query { .. } => DomainError::service_unavailable(err.to_string()),
    }
}

/// Submit a supplier: predict its risk, then persist the record.
///
/// One attempt, no retry. A prediction or persistence failure writes nothing
/// and surfaces the underlying error text.
#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    request_body = IntakeRequest,
    responses(
        (status = 201, description = "Supplier created", body = IntakeResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 503, description = "Prediction or storage failure; nothing persisted", body = DomainError)
    ),
    tags = ["suppliers"],
    operation_id = "createSupplier"
)]
#[post("/suppliers")]
pub async fn create_supplier(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<IntakeRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = payload.into_inner().into_draft().map_err(map_validation_error)?;
    let record = state
        .intake
        .submit(&user_id, draft)
        .await
        .map_err(map_intake_error)?;
    Ok(HttpResponse::Created().json(IntakeResponse {
        message: success_message(&record),
        supplier: SupplierResponse::from(&record),
    }))
}

/// List the owner's suppliers, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    responses(
        (status = 200, description = "Owner-scoped records", body = [SupplierResponse]),
        (status = 401, description = "Unauthorised", body = DomainError)
    ),
    tags = ["suppliers"],
    operation_id = "listSuppliers"
)]
#[get("/suppliers")]
pub async fn list_suppliers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SupplierResponse>>> {
    let user_id = session.require_user_id()?;
    let records = state
        .suppliers
        .list_for_owner(&user_id)
        .await
        .map_err(map_persistence_error)?;
    Ok(web::Json(records.iter().map(SupplierResponse::from).collect()))
}

/// Delete one supplier record owned by the session user.
#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    params(("id" = Uuid, Path, description = "Supplier record id")),
    responses(
        (status = 204, description = "Record removed"),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 404, description = "No such record for this owner", body = DomainError)
    ),
    tags = ["suppliers"],
    operation_id = "deleteSupplier"
)]
#[delete("/suppliers/{id}")]
pub async fn delete_supplier(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = SupplierId::from(path.into_inner());
    state
        .suppliers
        .delete(&user_id, id)
        .await
        .map_err(map_persistence_error)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Download the ESG report for one supplier as an HTML attachment.
#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}/report",
    params(("id" = Uuid, Path, description = "Supplier record id")),
    responses(
        (status = 200, description = "Rendered report", content_type = "text/html"),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 404, description = "No such record for this owner", body = DomainError)
    ),
    tags = ["suppliers"],
    operation_id = "supplierReport"
)]
#[get("/suppliers/{id}/report")]
pub async fn supplier_report(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = SupplierId::from(path.into_inner());
    let records = state
        .suppliers
        .list_for_owner(&user_id)
        .await
        .map_err(map_persistence_error)?;
    let record = records
        .iter()
        .find(|record| record.id == id)
        .ok_or_else(|| DomainError::not_found(format!("supplier not found: {id}")))?;

    let document = build_report(record, Utc::now());
    let filename = report_filename(&document.supplier_name);
    Ok(HttpResponse::Ok()
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .content_type("text/html; charset=utf-8")
        .body(render_html(&document)))
}

/// Serve the intake form's option lists and defaults.
#[utoipa::path(
    get,
    path = "/api/v1/intake/options",
    responses((status = 200, description = "Form options", body = IntakeOptions)),
    tags = ["suppliers"],
    operation_id = "intakeOptions",
    security([])
)]
#[get("/intake/options")]
pub async fn intake_options() -> web::Json<IntakeOptions> {
    web::Json(IntakeOptions {
        countries: COUNTRIES.to_vec(),
        industry_verticals: INDUSTRY_VERTICALS.to_vec(),
        worker_buckets: WorkerBucket::ALL.to_vec(),
        default_country: DEFAULT_COUNTRY,
        default_industry_vertical: DEFAULT_INDUSTRY_VERTICAL,
        default_worker_bucket: WorkerBucket::DEFAULT,
    })
}
