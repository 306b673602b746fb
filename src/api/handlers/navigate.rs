//! Navigation endpoints backed by the route table.

use super::{error_response, ErrorResponse};
use crate::{
    access::{navigate as resolve, AccessDecision, Navigation},
    api::state::SessionState,
};
use axum::{
    extract::{Extension, Query},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigateParams {
    /// Front-end path to resolve, e.g. `/admin`.
    pub path: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct NavigationResponse {
    /// Matched route path.
    pub path: String,
    /// View to render; absent on redirects.
    pub view: Option<String>,
    /// `render` or `redirect_to`.
    pub decision: String,
    /// Redirect target; absent when rendering.
    pub location: Option<String>,
}

impl From<Navigation> for NavigationResponse {
    fn from(navigation: Navigation) -> Self {
        let decision = match navigation.decision {
            AccessDecision::Render => "render",
            AccessDecision::RedirectTo(_) => "redirect_to",
        };
        Self {
            path: navigation.route.path.to_string(),
            view: navigation.view().map(str::to_string),
            decision: decision.to_string(),
            location: navigation.decision.location().map(str::to_string),
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/navigate",
    params(NavigateParams),
    responses(
        (status = 200, description = "Navigation decision", body = NavigationResponse),
        (status = 404, description = "Unknown route", body = ErrorResponse)
    ),
    tag = "navigation"
)]
pub async fn navigate(
    state: Extension<Arc<SessionState>>,
    Query(params): Query<NavigateParams>,
) -> impl IntoResponse {
    let identity = state.current().await;
    match resolve(&params.path, identity.as_ref()) {
        Some(navigation) => {
            debug!(path = %params.path, decision = ?navigation.decision, "navigation resolved");
            (StatusCode::OK, Json(NavigationResponse::from(navigation))).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "Unknown route"),
    }
}

/// Page requests for any front-end path: render the view or redirect.
pub async fn page(method: Method, uri: Uri, state: Extension<Arc<SessionState>>) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let identity = state.current().await;
    let Some(navigation) = resolve(uri.path(), identity.as_ref()) else {
        return error_response(StatusCode::NOT_FOUND, "Unknown route");
    };

    match navigation.decision {
        AccessDecision::Render => {
            (StatusCode::OK, Json(NavigationResponse::from(navigation))).into_response()
        }
        AccessDecision::RedirectTo(location) => {
            debug!(path = %uri.path(), location, "redirecting");
            Redirect::to(location).into_response()
        }
    }
}
