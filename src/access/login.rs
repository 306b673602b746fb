//! Login credential check.
//!
//! There is no credential backend: any non-empty password is accepted. The
//! role is whatever the directory says about the identifier.

use super::{
    identity::Identity,
    role::{normalize_identifier, RoleDirectory},
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,
}

/// Turn submitted credentials into an identity.
///
/// # Errors
/// Returns `LoginError::InvalidCredentials` if the identifier (after trimming)
/// or the password is empty.
pub fn authenticate(
    identifier: &str,
    password: &SecretString,
    directory: &RoleDirectory,
) -> Result<Identity, LoginError> {
    let subject_id = normalize_identifier(identifier);
    if subject_id.is_empty() || password.expose_secret().is_empty() {
        return Err(LoginError::InvalidCredentials);
    }

    Ok(Identity::new(&subject_id, directory.resolve(&subject_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{role_home, Role};

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn admin_logs_in_with_any_password() {
        let identity = authenticate("admin", &secret("x"), &RoleDirectory::default())
            .expect("login should succeed");
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(role_home(identity.role), "/admin");
    }

    #[test]
    fn manager_logs_in_with_any_password() {
        let identity = authenticate("manager", &secret("hunter2"), &RoleDirectory::default())
            .expect("login should succeed");
        assert_eq!(identity.role, Role::Manager);
        assert_eq!(role_home(identity.role), "/manager");
    }

    #[test]
    fn unknown_identifier_is_employee() {
        let identity = authenticate("jane.doe", &secret("pw"), &RoleDirectory::default())
            .expect("login should succeed");
        assert_eq!(identity.role, Role::Employee);
        assert_eq!(identity.subject_id, "jane.doe");
    }

    #[test]
    fn identifier_is_case_folded() {
        let identity = authenticate("  ADMIN ", &secret("pw"), &RoleDirectory::default())
            .expect("login should succeed");
        assert_eq!(identity.subject_id, "admin");
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn empty_identifier_or_password_is_rejected() {
        let directory = RoleDirectory::default();
        assert_eq!(
            authenticate("   ", &secret("pw"), &directory),
            Err(LoginError::InvalidCredentials)
        );
        assert_eq!(
            authenticate("admin", &secret(""), &directory),
            Err(LoginError::InvalidCredentials)
        );
        assert_eq!(
            LoginError::InvalidCredentials.to_string(),
            "Invalid credentials. Please try again."
        );
    }
}
