//! Runtime settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::DEFAULT_PREDICT_ENDPOINT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the server at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GREENCHAIN")]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Endpoint of the external risk-prediction service.
    pub predict_endpoint: Option<String>,
    /// Set the `Secure` flag on session cookies.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

impl Settings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured prediction endpoint, falling back to the default.
    pub fn predict_endpoint(&self) -> &str {
        self.predict_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_PREDICT_ENDPOINT)
    }
}
