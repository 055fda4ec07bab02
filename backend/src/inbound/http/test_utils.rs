//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{test as actix_test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::accounts::AccountService;
use crate::domain::intake::SupplierIntakeService;
use crate::domain::ports::{
    FixtureRiskPredictor, RiskPrediction, RiskPredictionError, RiskPredictor,
};
use crate::domain::supplier::SupplierAttributes;
use crate::inbound::http::state::HttpState;
use crate::inbound::ws::state::WsState;
use crate::outbound::{InMemoryDocumentStore, InMemoryIdentityProvider};
use crate::server::api_services;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Predictor double whose transport always fails.
struct FailingRiskPredictor;

#[async_trait]
impl RiskPredictor for FailingRiskPredictor {
    async fn predict(
        &self,
        _attributes: &SupplierAttributes,
    ) -> Result<RiskPrediction, RiskPredictionError> {
        Err(RiskPredictionError::transport("connection refused"))
    }
}

fn build_state(predictor: Arc<dyn RiskPredictor>) -> HttpState {
    let store = Arc::new(InMemoryDocumentStore::new());
    let identity = Arc::new(InMemoryIdentityProvider::new());
    HttpState::new(
        AccountService::new(identity, store.clone()),
        SupplierIntakeService::new(predictor, store.clone()),
        store.clone(),
        store,
    )
}

fn app_with_state(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let ws_state = WsState::new(state.suppliers.clone());
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(ws_state))
        .wrap(test_session_middleware())
        .service(api_services())
}

/// App with in-memory adapters and the always-`Low` fixture predictor.
pub fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    app_with_state(build_state(Arc::new(FixtureRiskPredictor)))
}

/// App whose predictor fails every request with a transport error.
pub fn test_app_with_failing_predictor() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    app_with_state(build_state(Arc::new(FailingRiskPredictor)))
}

/// Register an account and return its session cookie.
pub async fn signup_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> actix_web::cookie::Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "email": email,
            "password": "correct horse",
            "orgName": "Acme Sourcing",
        }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success());
    response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Intake body with valid defaults and the given supplier name.
pub fn intake_payload(name: &str) -> Value {
    json!({
        "name": name,
        "country": "India",
        "industryVertical": "Garment Manufacturing",
        "numberOfWorkers": "51-200",
        "totalEmissionsKgCo2e": 1000.0,
        "waterUsageM3": 500.0,
        "turnoverRatePercent": 5.0,
        "workplaceAccidentsLastYear": 0,
        "hasAntiCorruptionPolicy": false,
        "publishesEsgReport": false,
        "isIso14001Certified": false,
        "isSa8000Certified": false,
    })
}

/// Intake body carrying site coordinates.
pub fn intake_payload_with_coordinates(name: &str, lat: f64, lng: f64) -> Value {
    let mut payload = intake_payload(name);
    payload["lat"] = json!(lat);
    payload["lng"] = json!(lng);
    payload
}
