//! WebSocket inbound adapter: the live supplier feed.
//!
//! Responsibilities:
//! - authenticate the upgrade against the cookie session
//! - initialise the per-connection feed loop
//! - keep WebSocket-specific concerns at the edge of the system

use actix_web::web::{self, Payload};
use actix_web::{get, HttpRequest, HttpResponse};
use tracing::error;

mod feed;

pub mod messages;
pub mod state;

use crate::inbound::http::session::SessionContext;

/// Handle WebSocket upgrade for the `/ws/suppliers` endpoint.
#[get("/ws/suppliers")]
pub async fn supplier_feed(
    state: web::Data<state::WsState>,
    session: SessionContext,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let owner_id = session.require_user_id()?;

    let (response, ws_session, msg_stream) = actix_ws::handle(&req, stream).map_err(|err| {
        error!(error = %err, "WebSocket upgrade failed");
        actix_web::error::ErrorInternalServerError("WebSocket upgrade failed")
    })?;
    actix_web::rt::spawn(feed::handle_feed_session(
        state.suppliers.clone(),
        owner_id,
        ws_session,
        msg_stream,
    ));
    Ok(response)
}
