// Subprocess-based discovery
//
// Runs the Asterisk control binary (`asterisk -rx "<console command>"`),
// captures combined stdout/stderr, and line-parses peers/endpoints out of
// the console output. The parsers are pure functions over the captured
// text so the scraping rules are testable without an Asterisk install.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use crate::error::CoreError;

/// First column of `sip show peers`: `name/username`, id charset restricted
/// the way peer names actually appear in sip.conf.
#[allow(clippy::unwrap_used)]
fn sip_peer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([A-Za-z0-9_.\-]+)/").unwrap())
}

/// `Endpoint:  <name>/...` lines of `pjsip show endpoints`.
#[allow(clippy::unwrap_used)]
fn pjsip_endpoint_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*Endpoint:\s+(.*)$").unwrap())
}

/// ANSI escape sequences occasionally present in console output.
#[allow(clippy::unwrap_used)]
fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").unwrap())
}

/// Run `<asterisk_bin> -rx "<console_command>"` and return its combined
/// output, ANSI-stripped. Non-zero exit is fatal.
async fn run_console(asterisk_bin: &Path, console_command: &str) -> Result<String, CoreError> {
    let command_display = format!("{} -rx \"{console_command}\"", asterisk_bin.display());
    debug!(command = %command_display, "running asterisk console command");

    let output = Command::new(asterisk_bin)
        .arg("-rx")
        .arg(console_command)
        .output()
        .await
        .map_err(|source| CoreError::CommandSpawn {
            command: command_display.clone(),
            source,
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(CoreError::CommandFailed {
            command: command_display,
            status: output.status.to_string(),
            output: text,
        });
    }

    Ok(ansi_re().replace_all(&text, "").into_owned())
}

/// Discover SIP peers via `sip show peers`.
pub async fn sip_peers(asterisk_bin: &Path) -> Result<Vec<String>, CoreError> {
    let output = run_console(asterisk_bin, "sip show peers").await?;
    let peers = parse_sip_peers(&output);
    if peers.is_empty() {
        return Err(CoreError::NoEntities {
            source_name: "'sip show peers'".into(),
        });
    }
    debug!(count = peers.len(), "SIP peers discovered");
    Ok(peers.into_iter().collect())
}

/// Discover PJSIP endpoints via `pjsip show endpoints`.
pub async fn pjsip_endpoints(asterisk_bin: &Path) -> Result<Vec<String>, CoreError> {
    let output = run_console(asterisk_bin, "pjsip show endpoints").await?;
    let endpoints = parse_pjsip_endpoints(&output);
    if endpoints.is_empty() {
        return Err(CoreError::NoEntities {
            source_name: "'pjsip show endpoints'".into(),
        });
    }
    debug!(count = endpoints.len(), "PJSIP endpoints discovered");
    Ok(endpoints.into_iter().collect())
}

/// Parse `sip show peers` output.
///
/// Skips blank lines, the `Name/username` header, and the
/// `Monitored:` / `objects found` / `sip peers` / `sip devices` footers.
/// A real peer row has `name/username` in its first column.
fn parse_sip_peers(output: &str) -> BTreeSet<String> {
    let mut peers = BTreeSet::new();
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();
        if lower.starts_with("name/username") {
            continue;
        }
        if line.contains("Monitored:")
            || lower.contains("objects found")
            || lower.contains("sip peers")
            || lower.contains("sip devices")
        {
            continue;
        }
        if let Some(caps) = sip_peer_re().captures(line) {
            peers.insert(caps[1].to_owned());
        }
    }
    peers
}

/// Parse `pjsip show endpoints` output.
///
/// Takes the token after `Endpoint:` up to the first `/`, skipping the
/// `<Endpoint/...>` template line that matches superficially but is not a
/// real endpoint.
fn parse_pjsip_endpoints(output: &str) -> BTreeSet<String> {
    let mut endpoints = BTreeSet::new();
    for line in output.lines() {
        let Some(caps) = pjsip_endpoint_re().captures(line) else {
            continue;
        };
        let rest = caps[1].trim();
        let Some(first) = rest.split_whitespace().next() else {
            continue;
        };
        let name = first.split('/').next().unwrap_or_default().trim();
        if name.is_empty() || name.starts_with('<') {
            continue;
        }
        endpoints.insert(name.to_owned());
    }
    endpoints
}
