//! Route table of the HR front-end and the navigation resolver.
//!
//! Flow Overview: normalize the requested path, find its route, and either
//! render it, send the root path to the caller's home, or hand the guarded
//! route to [`decide`].

use super::{
    guard::{decide, AccessDecision, RouteRequirement},
    identity::Identity,
    role::{role_home, LOGIN_ROUTE},
};

pub const ROOT_ROUTE: &str = "/";

/// How a route is reached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouteAccess {
    /// Never guarded; used by the login view.
    Open,
    /// Guarded by the access guard.
    Guarded(RouteRequirement),
    /// The root path, which always redirects.
    RootRedirect,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Route {
    pub path: &'static str,
    pub view: Option<&'static str>,
    pub access: RouteAccess,
}

const fn guarded(
    path: &'static str,
    view: &'static str,
    requirement: RouteRequirement,
) -> Route {
    Route {
        path,
        view: Some(view),
        access: RouteAccess::Guarded(requirement),
    }
}

pub static ROUTES: [Route; 11] = [
    Route {
        path: LOGIN_ROUTE,
        view: Some("Login"),
        access: RouteAccess::Open,
    },
    guarded("/admin", "AdminDashboard", RouteRequirement::Admin),
    guarded("/manager", "ManagerDashboard", RouteRequirement::Manager),
    guarded("/employee", "EmployeeDashboard", RouteRequirement::Employee),
    guarded("/face-detection", "FaceDetection", RouteRequirement::Employee),
    guarded("/attendance", "AttendanceManagement", RouteRequirement::Manager),
    guarded("/salary", "SalaryTracker", RouteRequirement::Manager),
    guarded("/records", "EmployeeRecords", RouteRequirement::Manager),
    guarded("/users", "UserManagement", RouteRequirement::Manager),
    guarded("/profile", "ProfileSetting", RouteRequirement::None),
    Route {
        path: ROOT_ROUTE,
        view: None,
        access: RouteAccess::RootRedirect,
    },
];

/// Result of resolving a path against the route table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Navigation {
    pub route: &'static Route,
    pub decision: AccessDecision,
}

impl Navigation {
    /// View to render, `None` when the navigation redirects.
    #[must_use]
    pub fn view(&self) -> Option<&'static str> {
        if self.decision.is_render() {
            self.route.view
        } else {
            None
        }
    }
}

/// Strip query, fragment and trailing slashes; `""` becomes `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_ROUTE
    } else {
        trimmed
    }
}

/// Find the route of a path. Matching ignores ASCII case, so `/Admin` is `/admin`.
#[must_use]
pub fn lookup(path: &str) -> Option<&'static Route> {
    let path = normalize_path(path);
    ROUTES
        .iter()
        .find(|route| route.path.eq_ignore_ascii_case(path))
}

/// Resolve a navigation. Unknown paths return `None`.
#[must_use]
pub fn navigate(path: &str, identity: Option<&Identity>) -> Option<Navigation> {
    let route = lookup(path)?;
    let decision = match route.access {
        RouteAccess::Open => AccessDecision::Render,
        RouteAccess::RootRedirect => AccessDecision::RedirectTo(
            identity.map_or(LOGIN_ROUTE, |identity| role_home(identity.role)),
        ),
        RouteAccess::Guarded(requirement) => decide(identity, requirement),
    };
    Some(Navigation { route, decision })
}
