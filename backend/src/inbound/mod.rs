//! Inbound adapters: HTTP REST endpoints and the WebSocket live feed.

pub mod http;
pub mod ws;
