use crate::{
    access::RoleDirectory,
    api::{self, SessionState},
    cli::telemetry,
    session::{FileStorage, SessionStore},
};
use anyhow::Result;
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub bind: String,
    pub frontend_origin: Option<String>,
    pub session_file: PathBuf,
    pub admin_ids: Vec<String>,
    pub manager_ids: Vec<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to bind or stops with an error.
pub async fn execute(args: Args) -> Result<()> {
    let directory = RoleDirectory::new(args.admin_ids, args.manager_ids);
    debug!(
        admins = directory.admins().count(),
        managers = directory.managers().count(),
        "role directory loaded"
    );

    info!("Session file: {}", args.session_file.display());
    let store = SessionStore::new(FileStorage::new(args.session_file));
    let state = Arc::new(SessionState::restore(store, directory));

    let result = api::new(
        &args.bind,
        args.port,
        state,
        args.frontend_origin.as_deref(),
    )
    .await;

    telemetry::shutdown_tracer();

    result
}
