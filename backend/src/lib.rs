//! GreenChain backend library modules.
//!
//! Hexagonal layout: `domain` owns the supplier/account model and ports,
//! `inbound` maps HTTP and WebSocket traffic onto the domain, `outbound`
//! implements the ports against external collaborators, and `server`
//! assembles the application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
