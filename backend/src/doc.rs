//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the shared
//! error envelope, and the session cookie security scheme. The generated
//! document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::overview::OverviewSummary;
use crate::domain::{DomainError, ErrorCode};
use crate::inbound::http::auth::{IdentityResponse, LoginRequest, MeResponse, SignupRequest};
use crate::inbound::http::map::{MapMarker, MapMarkersResponse};
use crate::inbound::http::suppliers::{
    IntakeOptions, IntakeRequest, IntakeResponse, SupplierResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "GreenChain backend API",
        description = "Supplier ESG risk dashboard: intake, prediction, overview, map, and reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::suppliers::create_supplier,
        crate::inbound::http::suppliers::list_suppliers,
        crate::inbound::http::suppliers::delete_supplier,
        crate::inbound::http::suppliers::supplier_report,
        crate::inbound::http::suppliers::intake_options,
        crate::inbound::http::overview::overview,
        crate::inbound::http::map::map_markers,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        SignupRequest,
        LoginRequest,
        IdentityResponse,
        MeResponse,
        IntakeRequest,
        IntakeResponse,
        IntakeOptions,
        SupplierResponse,
        OverviewSummary,
        MapMarker,
        MapMarkersResponse,
    )),
    tags(
        (name = "auth", description = "Account registration and session management"),
        (name = "suppliers", description = "Supplier intake, listing, and reports"),
        (name = "overview", description = "Risk summary over the owner's records"),
        (name = "map", description = "Geographic marker view"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;
    use utoipa::OpenApi;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_the_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("DomainError").expect("DomainError schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn supplier_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let supplier = schemas
            .get("SupplierResponse")
            .expect("SupplierResponse schema");

        assert_object_schema_has_field(supplier, "riskBadge");
        assert_object_schema_has_field(supplier, "predictedRisk");
        assert_object_schema_has_field(supplier, "numberOfWorkers");
    }

    #[test]
    fn every_api_path_is_registered() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/auth/signup",
            "/api/v1/auth/login",
            "/api/v1/auth/logout",
            "/api/v1/auth/me",
            "/api/v1/suppliers",
            "/api/v1/suppliers/{id}",
            "/api/v1/suppliers/{id}/report",
            "/api/v1/intake/options",
            "/api/v1/overview",
            "/api/v1/map/markers",
            "/healthz/ready",
            "/healthz/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "OpenAPI document should register {path}"
            );
        }
    }
}
