//! Auth API handlers.
//!
//! ```text
//! POST /api/v1/auth/signup {"email":"you@co.example","password":"...","orgName":"Acme"}
//! POST /api/v1/auth/login  {"email":"you@co.example","password":"..."}
//! POST /api/v1/auth/logout
//! GET  /api/v1/auth/me
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::accounts::AccountError;
use crate::domain::ports::{Identity, IdentityProviderError, PROVIDER_MESSAGE_PREFIX};
use crate::domain::{
    Credentials, CredentialsValidationError, DomainError, OrganisationName, UserValidationError,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Sign-up request body for `POST /api/v1/auth/signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub org_name: String,
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity payload returned by signup, login, and `me`.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub user_id: String,
    pub email: String,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id.to_string(),
            email: identity.email.to_string(),
        }
    }
}

/// Profile payload returned by `GET /api/v1/auth/me`.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: String,
    pub email: String,
    pub org_name: String,
}

/// Strip the adapter-internal prefix from a provider message.
///
/// Provider messages are shown to users verbatim apart from this prefix.
fn strip_provider_prefix(message: &str) -> &str {
    message
        .strip_prefix(PROVIDER_MESSAGE_PREFIX)
        .unwrap_or(message)
}

fn map_account_error(err: AccountError) -> DomainError {
    match err {
        AccountError::Identity(identity) => map_identity_error(identity),
        AccountError::Profile(profile) => DomainError::service_unavailable(profile.to_string()),
    }
}

fn map_identity_error(err: IdentityProviderError) -> DomainError {
    match &err {
        IdentityProviderError::Rejected { message } => {
            DomainError::invalid_request(strip_provider_prefix(message))
        }
        IdentityProviderError::InvalidCredentials { message } => {
            DomainError::unauthorized(strip_provider_prefix(message))
        }
        IdentityProviderError::Unavailable { message } => {
            DomainError::service_unavailable(strip_provider_prefix(message))
        }
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> DomainError {
    let field = match &err {
        CredentialsValidationError::InvalidEmail(_) => "email",
        CredentialsValidationError::EmptyPassword => "password",
    };
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn map_org_name_error(err: UserValidationError) -> DomainError {
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": "orgName" }))
}

/// Register a new account and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = IdentityResponse),
        (status = 400, description = "Invalid request or email already in use", body = DomainError),
        (status = 503, description = "Identity provider or profile store unavailable", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = Credentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let org_name = OrganisationName::new(&payload.org_name).map_err(map_org_name_error)?;

    let identity = state
        .accounts
        .sign_up(&credentials, org_name)
        .await
        .map_err(map_account_error)?;
    session.persist_user(&identity.user_id)?;
    Ok(HttpResponse::Created().json(IdentityResponse::from(&identity)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = IdentityResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Invalid credentials", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = Credentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let identity = state
        .accounts
        .sign_in(&credentials)
        .await
        .map_err(map_account_error)?;
    session.persist_user(&identity.user_id)?;
    Ok(HttpResponse::Ok().json(IdentityResponse::from(&identity)))
}

/// Destroy the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Session destroyed")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the authenticated account's profile.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account", body = MeResponse),
        (status = 401, description = "Not signed in", body = DomainError),
        (status = 404, description = "Profile missing", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "me"
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MeResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state
        .profiles
        .find_by_user(&user_id)
        .await
        .map_err(|error| DomainError::service_unavailable(error.to_string()))?
        .ok_or_else(|| DomainError::not_found("no profile for the current session"))?;
    Ok(web::Json(MeResponse {
        user_id: profile.user_id.to_string(),
        email: profile.email.to_string(),
        org_name: profile.org_name.as_ref().to_owned(),
    }))
}
