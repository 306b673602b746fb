//! Maps validated CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{server, session};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let server_opts = server::Options::parse(matches)?;
    let session_opts = session::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port: server_opts.port,
        bind: server_opts.bind,
        frontend_origin: server_opts.frontend_origin,
        session_file: session_opts.session_file,
        admin_ids: session_opts.admin_ids,
        manager_ids: session_opts.manager_ids,
    }))
}
