//! Overview API handler.
//!
//! ```text
//! GET /api/v1/overview
//! ```

use actix_web::{get, web};

use crate::domain::overview::OverviewSummary;
use crate::domain::DomainError;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Risk counts derived from the owner's current record set.
#[utoipa::path(
    get,
    path = "/api/v1/overview",
    responses(
        (status = 200, description = "Risk counts", body = OverviewSummary),
        (status = 401, description = "Unauthorised", body = DomainError)
    ),
    tags = ["overview"],
    operation_id = "overview"
)]
#[get("/overview")]
pub async fn overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OverviewSummary>> {
    let user_id = session.require_user_id()?;
    let records = state
        .suppliers
        .list_for_owner(&user_id)
        .await
        .map_err(|error| DomainError::service_unavailable(error.to_string()))?;
    Ok(web::Json(OverviewSummary::from_records(&records)))
}
