//! Cookie session access for the supplier dashboard.
//!
//! The cookie stores exactly one value: the authenticated user id that
//! scopes every supplier query. Profiles and records live behind the
//! repository ports, so an invalid or stale id in the cookie simply reads
//! as "not logged in". The WebSocket upgrade extracts the same context, so
//! the feed shares the REST login.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{DomainError, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// The caller's identity as carried by the session cookie.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record a fresh login, replacing any previous user id.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| DomainError::internal(format!("failed to persist session: {error}")))
    }

    /// The logged-in user, or `None` for anonymous callers.
    ///
    /// A stored id that fails UUID validation is treated as anonymous
    /// rather than an error; the cookie is signed, so this only happens
    /// after a key rotation or a format change.
    pub fn user_id(&self) -> Result<Option<UserId>, DomainError> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| DomainError::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// The logged-in user, or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, DomainError> {
        self.user_id()?
            .ok_or_else(|| DomainError::unauthorized("login required"))
    }

    /// Log out: drop the session state and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
