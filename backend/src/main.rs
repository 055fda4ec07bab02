//! Backend entry-point: wires REST endpoints, the live feed, and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use greenchain::domain::accounts::AccountService;
use greenchain::domain::intake::SupplierIntakeService;
use greenchain::inbound::http::health::HealthState;
use greenchain::inbound::http::state::HttpState;
use greenchain::inbound::ws::state::WsState;
use greenchain::outbound::{HttpRiskPredictor, InMemoryDocumentStore, InMemoryIdentityProvider};
use greenchain::server::{create_server, ServerConfig, Settings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let predict_endpoint = Url::parse(settings.predict_endpoint()).map_err(|e| {
        std::io::Error::other(format!(
            "invalid prediction endpoint {}: {e}",
            settings.predict_endpoint()
        ))
    })?;
    let predictor = HttpRiskPredictor::new(predict_endpoint)
        .map_err(|e| std::io::Error::other(format!("failed to build prediction client: {e}")))?;

    let store = Arc::new(InMemoryDocumentStore::new());
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let http_state = HttpState::new(
        AccountService::new(identity, store.clone()),
        SupplierIntakeService::new(Arc::new(predictor), store.clone()),
        store.clone(),
        store.clone(),
    );
    let ws_state = WsState::new(store);

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        key,
        settings.cookie_secure,
        SameSite::Lax,
        settings.bind_addr().to_owned(),
    );

    let server = create_server(health_state.clone(), config, http_state, ws_state)?;
    let server_handle = server.handle();

    // Fail the liveness probe as soon as a shutdown signal arrives so the
    // load balancer drains the instance before connections drop.
    actix_web::rt::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "shutdown signal listener failed");
            return;
        }
        health_state.mark_unhealthy();
        server_handle.stop(true).await;
    });

    server.await
}
