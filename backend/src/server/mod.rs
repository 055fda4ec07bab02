//! Server construction and middleware wiring.

pub mod settings;

pub use settings::Settings;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer, Scope};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, map, overview, suppliers};
use crate::inbound::ws;
use crate::inbound::ws::state::WsState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: String,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: String) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }
}

/// Register every `/api/v1` endpoint on one scope.
///
/// Shared by the production app and handler tests so route wiring cannot
/// drift between the two.
pub fn api_services() -> Scope {
    web::scope("/api/v1")
        .service(auth::signup)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::me)
        .service(suppliers::create_supplier)
        .service(suppliers::list_suppliers)
        .service(suppliers::delete_supplier)
        .service(suppliers::supplier_report)
        .service(suppliers::intake_options)
        .service(overview::overview)
        .service(map::map_markers)
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        ws_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    // Session middleware wraps the whole app: the WebSocket feed authenticates
    // against the same cookie the REST endpoints set.
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(ws_state)
        .wrap(session)
        .service(api_services())
        .service(ws::supplier_feed)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the assembled adapter states.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    http_state: HttpState,
    ws_state: WsState,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ws_state = web::Data::new(ws_state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            ws_state: ws_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr.as_str())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
