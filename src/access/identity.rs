use super::role::{normalize_identifier, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const FALLBACK_INITIALS: &str = "GC";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
/// Authenticated principal of the current session.
pub struct Identity {
    pub subject_id: String,
    pub display_name: String,
    pub role: Role,
}

impl Identity {
    /// Builds an identity, normalizing the subject and deriving its display name.
    #[must_use]
    pub fn new(subject_id: &str, role: Role) -> Self {
        let subject_id = normalize_identifier(subject_id);
        let display_name = display_name_for(&subject_id);
        Self {
            subject_id,
            display_name,
            role,
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    #[must_use]
    pub const fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    /// Two-letter avatar label shown in the navigation bar.
    #[must_use]
    pub fn initials(&self) -> String {
        let initials: String = self.display_name.chars().take(2).collect();
        if initials.is_empty() {
            FALLBACK_INITIALS.to_string()
        } else {
            initials.to_uppercase()
        }
    }
}

/// Display name for a normalized subject identifier.
#[must_use]
pub fn display_name_for(subject_id: &str) -> String {
    match subject_id {
        "admin" => "Admin User".to_string(),
        "manager" => "Manager User".to_string(),
        "employee" => "Employee User".to_string(),
        other => other.to_string(),
    }
}
