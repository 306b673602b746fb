use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_ADMIN_IDS: &str = "admin-ids";
pub const ARG_MANAGER_IDS: &str = "manager-ids";

const DEFAULT_ADMINS: &str = "A001,A002,A003,admin";
const DEFAULT_MANAGERS: &str = "M001,M002,M003,manager";

#[derive(Debug, Clone)]
pub struct Options {
    pub session_file: PathBuf,
    pub admin_ids: Vec<String>,
    pub manager_ids: Vec<String>,
}

impl Options {
    /// Parse session and role directory arguments.
    ///
    /// # Errors
    /// Returns an error if the session file path is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let session_file = matches
            .get_one::<String>(ARG_SESSION_FILE)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_SESSION_FILE}"))?;

        let list = |id: &str| -> Vec<String> {
            matches
                .get_many::<String>(id)
                .map(|values| values.cloned().collect())
                .unwrap_or_default()
        };

        Ok(Self {
            session_file,
            admin_ids: list(ARG_ADMIN_IDS),
            manager_ids: list(ARG_MANAGER_IDS),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Path of the JSON file holding the active session")
                .env("HRGATE_SESSION_FILE")
                .default_value("hrgate-session.json"),
        )
        .arg(
            Arg::new(ARG_ADMIN_IDS)
                .long(ARG_ADMIN_IDS)
                .help("Comma separated identifiers that sign in as admin")
                .env("HRGATE_ADMIN_IDS")
                .value_delimiter(',')
                .default_value(DEFAULT_ADMINS),
        )
        .arg(
            Arg::new(ARG_MANAGER_IDS)
                .long(ARG_MANAGER_IDS)
                .help("Comma separated identifiers that sign in as manager")
                .env("HRGATE_MANAGER_IDS")
                .value_delimiter(',')
                .default_value(DEFAULT_MANAGERS),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::role::{DEFAULT_ADMIN_IDS, DEFAULT_MANAGER_IDS};

    #[test]
    fn test_defaults_match_directory() {
        assert_eq!(DEFAULT_ADMINS, DEFAULT_ADMIN_IDS.join(","));
        assert_eq!(DEFAULT_MANAGERS, DEFAULT_MANAGER_IDS.join(","));
    }

    #[test]
    fn test_parse_lists() {
        let matches = with_args(Command::new("hrgate")).get_matches_from(vec![
            "hrgate",
            "--session-file",
            "/tmp/session.json",
            "--admin-ids",
            "root,boss",
            "--manager-ids",
            "lead",
        ]);
        let options = Options::parse(&matches).expect("options");
        assert_eq!(options.session_file, PathBuf::from("/tmp/session.json"));
        assert_eq!(options.admin_ids, vec!["root", "boss"]);
        assert_eq!(options.manager_ids, vec!["lead"]);
    }

    #[test]
    fn test_blank_session_file() {
        let matches = with_args(Command::new("hrgate")).get_matches_from(vec![
            "hrgate",
            "--session-file",
            " ",
        ]);
        assert!(Options::parse(&matches).is_err());
    }
}
