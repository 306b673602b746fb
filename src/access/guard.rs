//! Route guard decision.
//!
//! `decide` is recomputed on every navigation from the current identity and
//! the route's requirement. It has no state and never fails; insufficient
//! privilege is expressed as a redirect to the caller's own home.

use super::{
    identity::Identity,
    role::{role_home, Role, LOGIN_ROUTE},
};
use serde::Serialize;

/// Requirement a guarded view declares.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteRequirement {
    /// Any authenticated identity.
    None,
    /// Employee-only view; admins and managers are sent home.
    Employee,
    /// Managers and admins.
    Manager,
    /// Admins only.
    Admin,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "decision", content = "location", rename_all = "snake_case")]
pub enum AccessDecision {
    Render,
    RedirectTo(&'static str),
}

impl AccessDecision {
    #[must_use]
    pub const fn is_render(self) -> bool {
        matches!(self, Self::Render)
    }

    /// Redirect target, if any.
    #[must_use]
    pub const fn location(self) -> Option<&'static str> {
        match self {
            Self::Render => None,
            Self::RedirectTo(location) => Some(location),
        }
    }
}

#[must_use]
pub fn decide(identity: Option<&Identity>, required: RouteRequirement) -> AccessDecision {
    let Some(identity) = identity else {
        return AccessDecision::RedirectTo(LOGIN_ROUTE);
    };

    let role = identity.role;
    let allowed = match required {
        RouteRequirement::None => true,
        RouteRequirement::Admin => role == Role::Admin,
        RouteRequirement::Manager => matches!(role, Role::Admin | Role::Manager),
        // Employee views are exclusive, not hierarchical.
        RouteRequirement::Employee => role == Role::Employee,
    };

    if allowed {
        AccessDecision::Render
    } else {
        AccessDecision::RedirectTo(role_home(role))
    }
}
