// ── Core error types ──
//
// Everything here is fatal and aborts the run. Per-entity create/update
// failures never become a `CoreError`; the provisioning loop records
// them and continues (see `provision`).

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote API (login, host resolution, lookups) ────────────────
    #[error(transparent)]
    Api(#[from] zabvox_api::Error),

    // ── Discovery: file-based ───────────────────────────────────────
    #[error("Configuration file not found: {path}")]
    FileMissing { path: PathBuf },

    #[error("Cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Discovery: subprocess-based ─────────────────────────────────
    #[error("Cannot run '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {output}")]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },

    // ── Discovery: remote-API-based ─────────────────────────────────
    #[error("Agent discovery failed after {attempts} attempts: {message}")]
    AgentFeed { attempts: u32, message: String },

    // ── Discovery: common ───────────────────────────────────────────
    /// Zero entities discovered. The CLI maps this to exit status 1 and
    /// creates nothing.
    #[error("No entities discovered from {source_name}")]
    NoEntities { source_name: String },
}
