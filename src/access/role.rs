//! Roles, the identifier-to-role directory, and the home route of each role.
//!
//! The role set is closed. Anything that cannot be mapped to a known role is
//! treated as `Employee`, the least privileged one.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Login route; every unauthenticated navigation ends here.
pub const LOGIN_ROUTE: &str = "/login";

pub const ADMIN_HOME: &str = "/admin";
pub const MANAGER_HOME: &str = "/manager";
pub const EMPLOYEE_HOME: &str = "/employee";

pub const DEFAULT_ADMIN_IDS: [&str; 4] = ["A001", "A002", "A003", "admin"];
pub const DEFAULT_MANAGER_IDS: [&str; 4] = ["M001", "M002", "M003", "manager"];

/// Closed role set, ordered by privilege: `Admin ⊇ Manager ⊇ Employee`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    /// Interpret a persisted role string. Unknown values fall back to `Employee`.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or(Self::Employee)
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    #[must_use]
    pub const fn is_manager(self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

/// Default dashboard of a role.
///
/// The root path, the post-login redirect and the guard all go through here.
#[must_use]
pub const fn role_home(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_HOME,
        Role::Manager => MANAGER_HOME,
        Role::Employee => EMPLOYEE_HOME,
    }
}

/// Normalize a login identifier: trimmed and lowercased.
#[must_use]
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Static membership lists mapping subject identifiers to roles.
///
/// Entries are only trimmed; the subject is case-folded before the lookup, so
/// an entry with upper-case letters such as `A001` never grants its role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleDirectory {
    admins: BTreeSet<String>,
    managers: BTreeSet<String>,
}

impl RoleDirectory {
    pub fn new<A, M>(admins: A, managers: M) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        Self {
            admins: normalized_set(admins),
            managers: normalized_set(managers),
        }
    }

    /// Role of a subject. Admin membership wins over manager membership.
    #[must_use]
    pub fn resolve(&self, subject_id: &str) -> Role {
        let subject_id = normalize_identifier(subject_id);
        if self.admins.contains(&subject_id) {
            Role::Admin
        } else if self.managers.contains(&subject_id) {
            Role::Manager
        } else {
            Role::Employee
        }
    }

    pub fn admins(&self) -> impl Iterator<Item = &str> {
        self.admins.iter().map(String::as_str)
    }

    pub fn managers(&self) -> impl Iterator<Item = &str> {
        self.managers.iter().map(String::as_str)
    }
}

fn normalized_set<I>(ids: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ids.into_iter()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

impl Default for RoleDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_IDS, DEFAULT_MANAGER_IDS)
    }
}
