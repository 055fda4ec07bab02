//! Per-connection loop for the live supplier feed.
//!
//! Keeps WebSocket framing and heartbeats at the edge while deferring data
//! access to the repository port. The public contract pings every 5s and
//! considers a connection idle after 10s without client traffic; the full
//! owner-scoped snapshot is sent on connect and again on every store change
//! notification. Feed-side errors are logged, never surfaced to the client,
//! so a failing listing degrades to a frozen list.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::time;
use tracing::warn;

use crate::domain::ports::SupplierRepository;
use crate::domain::user::UserId;
use crate::inbound::ws::messages::SnapshotMessage;

/// Time between heartbeats to the client (5s in production, shorter in tests).
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client (10s in production, shorter in tests).
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

pub(super) async fn handle_feed_session(
    suppliers: Arc<dyn SupplierRepository>,
    owner_id: UserId,
    session: Session,
    stream: MessageStream,
) {
    FeedSession::new(suppliers, owner_id)
        .run(session, stream)
        .await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct FeedSession {
    suppliers: Arc<dyn SupplierRepository>,
    owner_id: UserId,
}

impl FeedSession {
    fn new(suppliers: Arc<dyn SupplierRepository>, owner_id: UserId) -> Self {
        Self {
            suppliers,
            owner_id,
        }
    }

    async fn run(&self, mut session: Session, mut stream: MessageStream) {
        let mut revisions = self.suppliers.watch();
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        if let Err(error) = self.send_snapshot(&mut session).await {
            self.log_shutdown_reason(&error);
            return;
        }

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    self.handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                changed = revisions.changed() => {
                    match changed {
                        Ok(()) => self.send_snapshot(&mut session).await,
                        // The store dropped its sender; nothing further to stream.
                        Err(_) => Err(SessionError::StreamClosed),
                    }
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut session, &mut last_heartbeat, message)
                        .await
                }
            };

            if let Err(error) = result {
                self.log_shutdown_reason(&error);
                let close_action = self.close_action_for(&error);
                self.close_session_if_needed(session, close_action).await;
                return;
            }
        }
    }

    async fn send_snapshot(&self, session: &mut Session) -> Result<(), SessionError> {
        let records = match self.suppliers.list_for_owner(&self.owner_id).await {
            Ok(records) => records,
            Err(error) => {
                // Degrade to a frozen list rather than surfacing an error frame.
                warn!(error = %error, "supplier listing failed; skipping feed snapshot");
                return Ok(());
            }
        };

        let message = SnapshotMessage::new(&records);
        match serde_json::to_string(&message) {
            Ok(body) => session.text(body).await.map_err(SessionError::Network),
            Err(error) => {
                warn!(error = %error, "failed to serialise feed snapshot");
                Ok(())
            }
        }
    }

    async fn handle_heartbeat_tick(
        &self,
        session: &mut Session,
        last_heartbeat: &Instant,
    ) -> Result<(), SessionError> {
        if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
            return Err(SessionError::HeartbeatTimeout);
        }

        session.ping(b"").await.map_err(SessionError::Network)
    }

    async fn handle_stream_message(
        &self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(Message::Ping(payload)) => {
                *last_heartbeat = Instant::now();
                session
                    .pong(&payload)
                    .await
                    .map_err(SessionError::Network)?;
                Ok(())
            }
            // The feed is one-way; client frames only refresh the heartbeat.
            Ok(Message::Text(_))
            | Ok(Message::Pong(_))
            | Ok(Message::Binary(_))
            | Ok(Message::Continuation(_))
            | Ok(Message::Nop) => {
                *last_heartbeat = Instant::now();
                Ok(())
            }
            Ok(Message::Close(reason)) => Err(SessionError::ClientClosed(reason)),
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    fn log_shutdown_reason(&self, error: &SessionError) {
        match error {
            SessionError::HeartbeatTimeout => {
                warn!("feed heartbeat timeout; closing connection");
            }
            SessionError::Protocol(error) => {
                warn!(error = %error, "feed protocol error");
            }
            SessionError::Network(error) => {
                warn!(error = %error, "feed send failed; closing connection");
            }
            SessionError::ClientClosed(_) | SessionError::StreamClosed => {}
        }
    }

    fn close_action_for(&self, error: &SessionError) -> CloseAction {
        match error {
            SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Normal,
                description: Some("heartbeat timeout".to_owned()),
            })),
            SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Protocol,
                description: Some("protocol error".to_owned()),
            })),
            SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
            SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
        }
    }

    async fn close_session_if_needed(&self, session: Session, close_action: CloseAction) {
        if let CloseAction::Close(reason) = close_action {
            if let Err(error) = session.close(reason).await {
                warn!(error = %error, "failed to close feed session");
            }
        }
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
