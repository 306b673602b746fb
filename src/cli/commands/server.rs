use clap::{Arg, ArgMatches, Command};

pub const ARG_PORT: &str = "port";
pub const ARG_BIND: &str = "bind";
pub const ARG_FRONTEND_ORIGIN: &str = "frontend-origin";

#[derive(Debug, Clone)]
pub struct Options {
    pub port: u16,
    pub bind: String,
    pub frontend_origin: Option<String>,
}

impl Options {
    /// Parse listener arguments.
    ///
    /// # Errors
    /// Returns an error if the bind address is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
        let bind = matches
            .get_one::<String>(ARG_BIND)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_BIND}"))?;
        let frontend_origin = matches
            .get_one::<String>(ARG_FRONTEND_ORIGIN)
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty());

        Ok(Self {
            port,
            bind,
            frontend_origin,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("HRGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_BIND)
                .long(ARG_BIND)
                .help("Address to bind, IPv4 or IPv6")
                .default_value("::")
                .env("HRGATE_BIND"),
        )
        .arg(
            Arg::new(ARG_FRONTEND_ORIGIN)
                .long(ARG_FRONTEND_ORIGIN)
                .help("Origin allowed by CORS, example: https://hr.example.com")
                .env("HRGATE_FRONTEND_ORIGIN"),
        )
}
