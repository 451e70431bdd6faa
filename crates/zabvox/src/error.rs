//! CLI error types with miette diagnostics.
//!
//! Maps `zabvox_core::CoreError` and `zabvox_api::Error` into user-facing
//! errors with actionable help text and the documented exit codes.

use miette::Diagnostic;
use thiserror::Error;

use zabvox_core::CoreError;

/// Exit codes: 0 success, 1 degraded run (zero entities discovered or
/// per-entity failures), 2 fatal. Clap usage errors also exit 2.
pub mod exit_code {
    pub const DEGRADED: i32 = 1;
    pub const FATAL: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection / authentication ──────────────────────────────────
    #[error("Could not reach the Zabbix API at {url}")]
    #[diagnostic(
        code(zabvox::connection_failed),
        help(
            "Check that the frontend is running and the URL points at api_jsonrpc.php.\n\
             Self-signed certificate? Use --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(zabvox::auth_failed),
        help("Verify --username/--password or the ZBXPROV_USERNAME/ZBXPROV_PASSWORD variables.")
    )]
    AuthFailed { message: String },

    // ── Target resolution ────────────────────────────────────────────
    #[error("Host '{name}' not found in Zabbix")]
    #[diagnostic(
        code(zabvox::host_not_found),
        help("The lookup tries the technical host name first, then the visible name.")
    )]
    HostNotFound { name: String },

    #[error("Host '{name}' has no interface to bind agent items to")]
    #[diagnostic(
        code(zabvox::no_interface),
        help("Add a Zabbix agent interface to the host and retry.")
    )]
    NoAgentInterface { name: String },

    // ── Run results ──────────────────────────────────────────────────
    /// Discovery produced nothing; nothing was created.
    #[error(transparent)]
    #[diagnostic(code(zabvox::no_entities))]
    NoEntities(CoreError),

    #[error("{errors} of {total} entities failed to provision")]
    #[diagnostic(
        code(zabvox::partial_failure),
        help("The failing entities are marked ERR above; the rest were applied.")
    )]
    PartialFailure { errors: usize, total: usize },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Missing required setting: {name}")]
    #[diagnostic(
        code(zabvox::missing_setting),
        help("Provide --{name}, set {env}, or add it to the active profile.")
    )]
    MissingSetting { name: String, env: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(zabvox::profile_not_found),
        help("Available profiles: {available}\nConfig file: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(zabvox::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(zabvox::config))]
    Config(Box<figment::Error>),

    // ── Pass-throughs ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(zabvox::core))]
    Core(CoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoEntities { .. } => Self::NoEntities(err),
            CoreError::Api(api) => Self::from(api),
            other => Self::Core(other),
        }
    }
}

impl From<zabvox_api::Error> for CliError {
    fn from(err: zabvox_api::Error) -> Self {
        use zabvox_api::Error;
        match err {
            Error::Authentication { message } => Self::AuthFailed { message },
            Error::HostNotFound { name } => Self::HostNotFound { name },
            Error::NoAgentInterface { name } => Self::NoAgentInterface { name },
            other => Self::Core(CoreError::Api(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoEntities(_) | Self::PartialFailure { .. } => exit_code::DEGRADED,
            _ => exit_code::FATAL,
        }
    }
}
