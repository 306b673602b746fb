//! Session endpoints: login, logout and the current identity.
//!
//! Flow Overview: login checks the placeholder credentials, persists the
//! identity and answers with the role's home; logout clears the store and
//! answers with the login route, or 500 when the store keeps the identity.

use super::{error_response, ErrorResponse};
use crate::{
    access::{authenticate, Identity, Role, LOGIN_ROUTE},
    api::state::SessionState,
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginRequest {
    pub identifier: String,
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
/// Session summary for the front-end; contains no secrets.
pub struct SessionResponse {
    pub subject_id: String,
    pub display_name: String,
    pub role: Role,
    pub is_admin: bool,
    pub is_manager: bool,
    pub initials: String,
}

impl From<&Identity> for SessionResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            subject_id: identity.subject_id.clone(),
            display_name: identity.display_name.clone(),
            role: identity.role,
            is_admin: identity.is_admin(),
            is_manager: identity.is_manager(),
            initials: identity.initials(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub session: SessionResponse,
    pub redirect: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LogoutResponse {
    pub redirect: String,
}

#[utoipa::path(
    post,
    path = "/v1/session/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Empty identifier or password", body = ErrorResponse),
        (status = 500, description = "Session could not be persisted", body = ErrorResponse)
    ),
    tag = "session"
)]
#[instrument(skip_all)]
pub async fn login(
    state: Extension<Arc<SessionState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Missing payload");
    };

    let identity = match authenticate(&request.identifier, &request.password, state.directory())
    {
        Ok(identity) => identity,
        Err(err) => {
            info!("Rejected login: {err}");
            return error_response(StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    let session = SessionResponse::from(&identity);
    match state.sign_in(identity).await {
        Ok(home) => {
            info!(subject_id = %session.subject_id, role = %session.role, "Signed in");
            let response = LoginResponse {
                session,
                redirect: home.to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            error!("Failed to persist session: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to persist session")
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/session/logout",
    responses(
        (status = 200, description = "Session cleared", body = LogoutResponse),
        (status = 500, description = "Session could not be cleared", body = ErrorResponse)
    ),
    tag = "session"
)]
#[instrument(skip_all)]
pub async fn logout(state: Extension<Arc<SessionState>>) -> impl IntoResponse {
    match state.sign_out().await {
        Ok(Some(previous)) => info!(subject_id = %previous.subject_id, "Signed out"),
        Ok(None) => info!("Sign out without an active session"),
        Err(err) => {
            error!("Failed to clear session: {err}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to clear session");
        }
    }

    let response = LogoutResponse {
        redirect: LOGIN_ROUTE.to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[utoipa::path(
    get,
    path = "/v1/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "session"
)]
pub async fn current(state: Extension<Arc<SessionState>>) -> impl IntoResponse {
    match state.current().await {
        Some(identity) => (StatusCode::OK, Json(SessionResponse::from(&identity))).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
