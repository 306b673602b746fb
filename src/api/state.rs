//! Process-wide session state shared by the handlers.
//!
//! The identity is loaded once when the process starts and cached; only the
//! login and logout handlers mutate it. Both write the store first and touch
//! the cache only once the write succeeded, so the cache never claims a state
//! the next process start would not restore.
//!
//! Store calls after start-up run on the blocking pool; the write lock is held
//! across them so sign in and sign out are serialized.

use crate::{
    access::{role_home, Identity, RoleDirectory},
    session::{SessionError, SessionStore},
};
use std::sync::Arc;
use tokio::{sync::RwLock, task};
use tracing::info;

#[derive(Debug)]
pub struct SessionState {
    store: Arc<SessionStore>,
    directory: RoleDirectory,
    current: RwLock<Option<Identity>>,
}

impl SessionState {
    /// Build the state, restoring any persisted identity.
    ///
    /// Reads the store on the calling thread; it runs once before serving.
    #[must_use]
    pub fn restore(store: SessionStore, directory: RoleDirectory) -> Self {
        let current = store.load();
        match &current {
            Some(identity) => info!(
                subject_id = %identity.subject_id,
                role = %identity.role,
                "Restored session"
            ),
            None => info!("No persisted session"),
        }

        Self {
            store: Arc::new(store),
            directory,
            current: RwLock::new(current),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &RoleDirectory {
        &self.directory
    }

    #[must_use]
    pub fn storage_kind(&self) -> &'static str {
        self.store.storage_kind()
    }

    /// Whether the backing storage can currently be read.
    pub async fn storage_readable(&self) -> bool {
        self.blocking(|store| store.probe().map_err(SessionError::from))
            .await
            .is_ok()
    }

    pub async fn current(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    /// Persist a new identity and return its home route.
    ///
    /// # Errors
    /// Returns an error if the identity cannot be saved; the previous
    /// session stays active in that case.
    pub async fn sign_in(&self, identity: Identity) -> Result<&'static str, SessionError> {
        let mut current = self.current.write().await;
        let to_save = identity.clone();
        self.blocking(move |store| store.save(&to_save)).await?;
        let home = role_home(identity.role);
        *current = Some(identity);
        Ok(home)
    }

    /// Drop the active identity. Signing out twice is not an error.
    ///
    /// # Errors
    /// Returns an error if the store cannot be cleared; the identity then
    /// stays active, matching what a restart would restore.
    pub async fn sign_out(&self) -> Result<Option<Identity>, SessionError> {
        let mut current = self.current.write().await;
        self.blocking(|store| store.clear()).await?;
        Ok(current.take())
    }

    async fn blocking<T, F>(&self, call: F) -> Result<T, SessionError>
    where
        F: FnOnce(&SessionStore) -> Result<T, SessionError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || call(&store)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;
    use crate::session::FileStorage;
    use std::{fs, path::Path};

    fn file_state(path: &Path) -> SessionState {
        SessionState::restore(
            SessionStore::new(FileStorage::new(path)),
            RoleDirectory::default(),
        )
    }

    // A directory in place of the temporary file makes every write fail.
    fn block_writes(path: &Path) {
        let mut tmp = path.to_path_buf().into_os_string();
        tmp.push(".tmp");
        fs::create_dir_all(tmp).expect("block writes");
    }

    #[tokio::test]
    async fn sign_in_and_out() {
        let state = SessionState::restore(SessionStore::in_memory(), RoleDirectory::default());
        assert_eq!(state.current().await, None);

        let home = state
            .sign_in(Identity::new("manager", Role::Manager))
            .await
            .expect("sign in");
        assert_eq!(home, "/manager");
        assert_eq!(
            state.current().await.map(|identity| identity.role),
            Some(Role::Manager)
        );

        let previous = state.sign_out().await.expect("sign out");
        assert_eq!(previous.map(|identity| identity.subject_id), Some("manager".to_string()));
        assert_eq!(state.current().await, None);
        assert_eq!(state.sign_out().await.expect("sign out again"), None);
    }

    #[tokio::test]
    async fn restore_reads_persisted_identity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        file_state(&path)
            .sign_in(Identity::new("admin", Role::Admin))
            .await
            .expect("sign in");

        let second = file_state(&path);
        assert_eq!(
            second.current().await,
            Some(Identity::new("admin", Role::Admin))
        );
        assert!(second.storage_readable().await);
        assert_eq!(second.storage_kind(), "file");
    }

    #[tokio::test]
    async fn failed_sign_out_keeps_identity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let admin = Identity::new("admin", Role::Admin);

        let state = file_state(&path);
        state.sign_in(admin.clone()).await.expect("sign in");
        block_writes(&path);

        assert!(state.sign_out().await.is_err());
        assert_eq!(state.current().await, Some(admin.clone()));
        assert_eq!(file_state(&path).current().await, Some(admin));

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        fs::remove_dir(tmp).expect("unblock writes");

        assert!(state.sign_out().await.expect("sign out").is_some());
        assert_eq!(state.current().await, None);
        assert_eq!(file_state(&path).current().await, None);
    }

    #[tokio::test]
    async fn failed_sign_in_keeps_previous_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let manager = Identity::new("manager", Role::Manager);

        let state = file_state(&path);
        state.sign_in(manager.clone()).await.expect("sign in");
        block_writes(&path);

        assert!(state
            .sign_in(Identity::new("admin", Role::Admin))
            .await
            .is_err());
        assert_eq!(state.current().await, Some(manager));
    }

    #[tokio::test]
    async fn corrupt_file_is_unreadable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").expect("write");

        let state = file_state(&path);
        assert_eq!(state.current().await, None);
        assert!(!state.storage_readable().await);
    }
}
