//! Map API handler.
//!
//! ```text
//! GET /api/v1/map/markers
//! ```
//!
//! One marker per record carrying both coordinates; records missing either
//! coordinate are omitted. The marker palette is defined here, independently
//! of the list badge colours.

use actix_web::{get, web};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::supplier::{RiskBand, SupplierRecord};
use crate::domain::DomainError;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Raster tile URL template for the browser map client.
pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
/// Attribution line the tile provider requires.
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Marker colour keyed by risk band, in the map's own palette.
fn marker_colour(risk: Option<RiskBand>) -> &'static str {
    match risk {
        Some(RiskBand::High) => "#EF4444",
        Some(RiskBand::Medium) => "#F59E0B",
        Some(RiskBand::Low) => "#10B981",
        None => "#6B7280",
    }
}

/// One map marker with its popup fields.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub risk: Option<String>,
    pub colour: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl MapMarker {
    fn try_from_record(record: &SupplierRecord) -> Option<Self> {
        let coordinates = record.coordinates?;
        Some(Self {
            id: *record.id.as_uuid(),
            name: record.attributes.name.clone(),
            country: record.attributes.country.clone(),
            risk: record.predicted_risk.map(|band| band.as_str().to_owned()),
            colour: marker_colour(record.predicted_risk),
            lat: coordinates.lat,
            lng: coordinates.lng,
        })
    }
}

/// Marker set plus the tile configuration the browser client needs.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapMarkersResponse {
    pub tile_url_template: &'static str,
    pub attribution: &'static str,
    pub markers: Vec<MapMarker>,
}

/// Markers for every owner record possessing coordinates.
#[utoipa::path(
    get,
    path = "/api/v1/map/markers",
    responses(
        (status = 200, description = "Marker set and tile configuration", body = MapMarkersResponse),
        (status = 401, description = "Unauthorised", body = DomainError)
    ),
    tags = ["map"],
    operation_id = "mapMarkers"
)]
#[get("/map/markers")]
pub async fn map_markers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MapMarkersResponse>> {
    let user_id = session.require_user_id()?;
    let records = state
        .suppliers
        .list_for_owner(&user_id)
        .await
        .map_err(|error| DomainError::service_unavailable(error.to_string()))?;
    let markers = records.iter().filter_map(MapMarker::try_from_record).collect();
    Ok(web::Json(MapMarkersResponse {
        tile_url_template: TILE_URL_TEMPLATE,
        attribution: TILE_ATTRIBUTION,
        markers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{
        intake_payload, intake_payload_with_coordinates, signup_and_get_cookie, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Some(RiskBand::High), "#EF4444")]
    #[case(Some(RiskBand::Medium), "#F59E0B")]
    #[case(Some(RiskBand::Low), "#10B981")]
    #[case(None, "#6B7280")]
    fn marker_palette_is_keyed_by_band(#[case] risk: Option<RiskBand>, #[case] expected: &str) {
        assert_eq!(marker_colour(risk), expected);
    }

    #[actix_web::test]
    async fn omits_records_without_coordinates() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = signup_and_get_cookie(&app, "buyer@acme.example").await;

        let located = actix_test::TestRequest::post()
            .uri("/api/v1/suppliers")
            .cookie(cookie.clone())
            .set_json(intake_payload_with_coordinates("Located", 26.9, 75.8))
            .to_request();
        assert!(actix_test::call_service(&app, located).await.status().is_success());
        let unlocated = actix_test::TestRequest::post()
            .uri("/api/v1/suppliers")
            .cookie(cookie.clone())
            .set_json(intake_payload("Unlocated"))
            .to_request();
        assert!(actix_test::call_service(&app, unlocated).await.status().is_success());

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/map/markers")
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["tileUrlTemplate"], TILE_URL_TEMPLATE);
        assert_eq!(body["attribution"], TILE_ATTRIBUTION);
        let markers = body["markers"].as_array().expect("markers");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0]["name"], "Located");
        assert_eq!(markers[0]["colour"], "#10B981");
        assert_eq!(markers[0]["lat"], 26.9);
    }

    #[actix_web::test]
    async fn requires_a_session() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/map/markers")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
