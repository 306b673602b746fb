use super::handlers::{health, navigate, session, ErrorResponse};
use crate::access::{Identity, Role};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        session::login,
        session::logout,
        session::current,
        navigate::navigate,
    ),
    components(schemas(
        health::Health,
        session::LoginRequest,
        session::LoginResponse,
        session::LogoutResponse,
        session::SessionResponse,
        navigate::NavigationResponse,
        ErrorResponse,
        Identity,
        Role,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "session", description = "Login, logout and the active identity"),
        (name = "navigation", description = "Route guard decisions"),
    )
)]
struct ApiDoc;

/// `OpenAPI` document for the documented routes.
///
/// Page navigation (the router fallback) is not documented.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = env!("CARGO_PKG_NAME").to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc.info.description = Some(env!("CARGO_PKG_DESCRIPTION").to_string());
    doc
}
