use thiserror::Error;

/// Top-level error type for the `zabvox-api` crate.
///
/// Covers every failure mode of a provisioning run at the wire level:
/// authentication, transport, and the JSON-RPC `error` member.
/// `zabvox-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// `user.login` failed (wrong credentials, account locked, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP status from the API endpoint.
    #[error("API endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    // ── JSON-RPC ────────────────────────────────────────────────────
    /// The response carried an `error` member instead of `result`.
    #[error("API error {code}: {message}{}", .data.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Api {
        code: i64,
        message: String,
        data: Option<String>,
    },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Resolution ──────────────────────────────────────────────────
    /// Neither the technical nor the visible host name matched.
    #[error("Host '{name}' not found on the Zabbix server")]
    HostNotFound { name: String },

    /// The target host has no interfaces at all.
    #[error("Host '{name}' has no interfaces -- add a Zabbix agent interface")]
    NoAgentInterface { name: String },
}
