//! End-to-end behavioural tests covering the supplier dashboard flow.
//!
//! Exercises the assembled application the way a browser would: register an
//! account, submit suppliers through intake, then read them back through the
//! list, overview, map, and report endpoints before deleting them.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::{
    body::{to_bytes, BoxBody},
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test::{self, TestRequest},
    web, App,
};
use rstest::rstest;
use serde_json::{json, Value};

use greenchain::domain::accounts::AccountService;
use greenchain::domain::intake::SupplierIntakeService;
use greenchain::domain::ports::FixtureRiskPredictor;
use greenchain::inbound::http::state::HttpState;
use greenchain::inbound::ws;
use greenchain::inbound::ws::state::WsState;
use greenchain::outbound::{InMemoryDocumentStore, InMemoryIdentityProvider};
use greenchain::server::api_services;

// Example Sec-WebSocket-Key from RFC 6455 section 1.3 used to satisfy handshake requirements.
const RFC6455_SAMPLE_KEY: &str = "dGhlIHNhbXBsZSBub25jZQ==";

async fn init_app() -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    let store = Arc::new(InMemoryDocumentStore::new());
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let http_state = HttpState::new(
        AccountService::new(identity, store.clone()),
        SupplierIntakeService::new(Arc::new(FixtureRiskPredictor), store.clone()),
        store.clone(),
        store.clone(),
    );
    let ws_state = WsState::new(store);

    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    test::init_service(
        App::new()
            .app_data(web::Data::new(http_state))
            .app_data(web::Data::new(ws_state))
            .wrap(session)
            .service(api_services())
            .service(ws::supplier_feed),
    )
    .await
}

async fn signup(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    email: &str,
) -> Cookie<'static> {
    let request = TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "email": email,
            "password": "correct horse",
            "orgName": "Acme Sourcing",
        }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

fn intake_payload(name: &str) -> Value {
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

async fn create_supplier(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    payload: Value,
) -> Value {
    let request = TestRequest::post()
        .uri("/api/v1/suppliers")
        .cookie(cookie.clone())
        .set_json(payload)
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    test::read_body_json(response).await
}

async fn get_json(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    uri: &str,
) -> Value {
    let request = TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    test::read_body_json(response).await
}

#[rstest]
fn full_supplier_lifecycle() {
    actix_rt::System::new().block_on(async {
        let app = init_app().await;
        let cookie = signup(&app, "ops@acme.example").await;

        let me = get_json(&app, &cookie, "/api/v1/auth/me").await;
        assert_eq!(me["email"], "ops@acme.example");
        assert_eq!(me["orgName"], "Acme Sourcing");

        let first = create_supplier(&app, &cookie, intake_payload("First Mill")).await;
        assert_eq!(
            first["message"],
            "Supplier \"First Mill\" added with a risk of: LOW"
        );
        assert_eq!(first["supplier"]["predictedRisk"], "Low");
        assert_eq!(first["supplier"]["riskBadge"], "green");

        let mut located = intake_payload("Second Mill");
        located["lat"] = json!(26.9124);
        located["lng"] = json!(75.7873);
        let second = create_supplier(&app, &cookie, located).await;
        let second_id = second["supplier"]["id"].as_str().expect("id").to_owned();

        // Listing is newest-first.
        let listed = get_json(&app, &cookie, "/api/v1/suppliers").await;
        let names: Vec<&str> = listed
            .as_array()
            .expect("array")
            .iter()
            .map(|s| s["name"].as_str().expect("name"))
            .collect();
        assert_eq!(names, ["Second Mill", "First Mill"]);

        let overview = get_json(&app, &cookie, "/api/v1/overview").await;
        assert_eq!(overview["total"], 2);
        assert_eq!(overview["lowRisk"], 2);
        assert_eq!(overview["highRisk"], 0);

        // Only the supplier with coordinates appears on the map.
        let map = get_json(&app, &cookie, "/api/v1/map/markers").await;
        let markers = map["markers"].as_array().expect("markers");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0]["name"], "Second Mill");
        assert_eq!(markers[0]["colour"], "#10B981");

        let report_request = TestRequest::get()
            .uri(&format!("/api/v1/suppliers/{second_id}/report"))
            .cookie(cookie.clone())
            .to_request();
        let report = test::call_service(&app, report_request).await;
        assert_eq!(report.status(), StatusCode::OK);
        let disposition = report
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .expect("content disposition")
            .to_str()
            .expect("ascii header");
        assert!(disposition.contains("GreenChain_ESG_Report_Second_Mill"));
        let body = to_bytes(report.into_body()).await.expect("body");
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains("Second Mill"));

        let delete_request = TestRequest::delete()
            .uri(&format!("/api/v1/suppliers/{second_id}"))
            .cookie(cookie.clone())
            .to_request();
        let deleted = test::call_service(&app, delete_request).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        // Deleting again reports the record as gone.
        let repeat_request = TestRequest::delete()
            .uri(&format!("/api/v1/suppliers/{second_id}"))
            .cookie(cookie.clone())
            .to_request();
        let repeated = test::call_service(&app, repeat_request).await;
        assert_eq!(repeated.status(), StatusCode::NOT_FOUND);

        let remaining = get_json(&app, &cookie, "/api/v1/suppliers").await;
        assert_eq!(remaining.as_array().expect("array").len(), 1);
    });
}

#[rstest]
fn records_are_scoped_to_their_owner() {
    actix_rt::System::new().block_on(async {
        let app = init_app().await;
        let first_cookie = signup(&app, "first@acme.example").await;
        let second_cookie = signup(&app, "second@acme.example").await;

        create_supplier(&app, &first_cookie, intake_payload("Private Mill")).await;

        let listed = get_json(&app, &second_cookie, "/api/v1/suppliers").await;
        assert!(listed.as_array().expect("array").is_empty());

        let overview = get_json(&app, &second_cookie, "/api/v1/overview").await;
        assert_eq!(overview["total"], 0);
    });
}

#[rstest]
fn logout_invalidates_the_session() {
    actix_rt::System::new().block_on(async {
        let app = init_app().await;
        let cookie = signup(&app, "leaver@acme.example").await;

        let logout_request = TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie.clone())
            .to_request();
        let logout = test::call_service(&app, logout_request).await;
        assert_eq!(logout.status(), StatusCode::NO_CONTENT);
        let cleared = logout
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();

        let request = TestRequest::get()
            .uri("/api/v1/suppliers")
            .cookie(cleared)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    });
}

#[rstest]
fn feed_upgrade_requires_a_session() {
    actix_rt::System::new().block_on(async {
        let app = init_app().await;

        let request = TestRequest::get()
            .uri("/ws/suppliers")
            .insert_header((header::UPGRADE, "websocket"))
            .insert_header((header::CONNECTION, "Upgrade"))
            .insert_header((header::SEC_WEBSOCKET_VERSION, "13"))
            .insert_header((header::SEC_WEBSOCKET_KEY, RFC6455_SAMPLE_KEY))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let cookie = signup(&app, "watcher@acme.example").await;
        let request = TestRequest::get()
            .uri("/ws/suppliers")
            .cookie(cookie)
            .insert_header((header::UPGRADE, "websocket"))
            .insert_header((header::CONNECTION, "Upgrade"))
            .insert_header((header::SEC_WEBSOCKET_VERSION, "13"))
            .insert_header((header::SEC_WEBSOCKET_KEY, RFC6455_SAMPLE_KEY))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SWITCHING_PROTOCOLS);
    });
}
