//! Durable holder of the single active identity.
//!
//! Flow Overview: the login flow saves an identity, the process start loads it
//! back, and logout clears it. Partial or unreadable state loads as `None`;
//! it is never surfaced as an error to the caller.

pub mod storage;

pub use self::storage::{FileStorage, MemoryStorage, Storage, StorageError};

use crate::access::{identity::display_name_for, Identity, Role};
use thiserror::Error;
use tracing::{debug, warn};

/// Persisted field names.
pub mod keys {
    pub const SUBJECT_ID: &str = "subjectId";
    pub const DISPLAY_NAME: &str = "displayName";
    pub const ROLE: &str = "role";
    pub const IS_ADMIN: &str = "isAdmin";
    pub const IS_MANAGER: &str = "isManager";

    pub const ALL: [&str; 5] = [SUBJECT_ID, DISPLAY_NAME, ROLE, IS_ADMIN, IS_MANAGER];
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session subject id must not be empty")]
    EmptySubject,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct SessionStore {
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("storage", &self.storage.kind())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    #[must_use]
    pub fn storage_kind(&self) -> &'static str {
        self.storage.kind()
    }

    /// Persist an identity, replacing any previous one.
    ///
    /// # Errors
    /// Returns `SessionError::EmptySubject` for an empty subject id, or the
    /// storage error if the write fails.
    pub fn save(&self, identity: &Identity) -> Result<(), SessionError> {
        if identity.subject_id.trim().is_empty() {
            return Err(SessionError::EmptySubject);
        }

        self.storage.set_many(&[
            (keys::SUBJECT_ID, identity.subject_id.clone()),
            (keys::DISPLAY_NAME, identity.display_name.clone()),
            (keys::ROLE, identity.role.as_str().to_string()),
            (keys::IS_ADMIN, identity.is_admin().to_string()),
            (keys::IS_MANAGER, identity.is_manager().to_string()),
        ])?;

        debug!(subject_id = %identity.subject_id, role = %identity.role, "session saved");

        Ok(())
    }

    /// Read the persisted identity back.
    ///
    /// `subjectId` and `role` must both be present; a missing display name is
    /// derived again. The redundant flags are ignored in favor of `role`.
    #[must_use]
    pub fn load(&self) -> Option<Identity> {
        match self.try_load() {
            Ok(identity) => identity,
            Err(err) => {
                warn!("Treating unreadable session as signed out: {err}");
                None
            }
        }
    }

    /// Read the primary key without interpreting it, surfacing storage errors.
    ///
    /// # Errors
    /// Returns the storage error if the backend cannot be read.
    pub fn probe(&self) -> Result<(), StorageError> {
        self.storage.get(keys::SUBJECT_ID).map(|_| ())
    }

    fn try_load(&self) -> Result<Option<Identity>, StorageError> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let Some(subject_id) = present(self.storage.get(keys::SUBJECT_ID)?) else {
            return Ok(None);
        };
        let Some(role) = present(self.storage.get(keys::ROLE)?) else {
            debug!("session has a subject but no role");
            return Ok(None);
        };
        let display_name = present(self.storage.get(keys::DISPLAY_NAME)?)
            .unwrap_or_else(|| display_name_for(&subject_id));

        Ok(Some(Identity {
            subject_id,
            display_name,
            role: Role::from_stored(&role),
        }))
    }

    /// Remove every persisted field. Clearing an empty store is fine.
    ///
    /// # Errors
    /// Returns the storage error if the removal cannot be written.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove_many(&keys::ALL)?;
        debug!("session cleared");
        Ok(())
    }
}
