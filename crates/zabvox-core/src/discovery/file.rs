// File-based discovery
//
// Two line-oriented formats:
//  - Zabbix agent configuration: `UserParameter=<prefix>.<id>,<command>`
//    where only the id segment matters.
//  - DID roster: `did<TAB>country<TAB>account<TAB>overflow-ip`.

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::CoreError;

/// A DID (inbound number) with its routing metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Did {
    pub did: String,
    pub country: String,
    pub account: String,
    pub overflow_ip: String,
}

/// Extract the unique id segments of `UserParameter=<prefix>.<id>,` lines.
///
/// `extra` ids are unioned in (peers known to the operator but absent from
/// the agent configuration). Fails when the file is missing or when the
/// union is empty.
pub fn userparameter_ids(
    path: &Path,
    key_prefix: &str,
    extra: &[String],
) -> Result<Vec<String>, CoreError> {
    if !path.is_file() {
        return Err(CoreError::FileMissing {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut ids = scan_userparameters(&text, key_prefix);
    ids.extend(extra.iter().filter(|e| !e.is_empty()).cloned());

    if ids.is_empty() {
        return Err(CoreError::NoEntities {
            source_name: format!("{} (UserParameter={key_prefix}.*)", path.display()),
        });
    }

    debug!(count = ids.len(), prefix = key_prefix, "ids from agent conf");
    Ok(ids.into_iter().collect())
}

/// Pure scan: ids captured from `UserParameter=<prefix>.<id>,` lines.
fn scan_userparameters(text: &str, key_prefix: &str) -> BTreeSet<String> {
    let pattern = format!(
        r"^\s*UserParameter\s*=\s*{}\.([A-Za-z0-9_.\-]+)\s*,",
        regex::escape(key_prefix)
    );
    // The pattern is built from a literal template and an escaped prefix.
    #[allow(clippy::unwrap_used)]
    let re = Regex::new(&pattern).unwrap();

    text.lines()
        .filter_map(|line| re.captures(line))
        .map(|caps| caps[1].to_owned())
        .collect()
}

/// Read a DID roster file: one tab-separated entry per line.
///
/// Lines with fewer than four columns are skipped; duplicate DIDs keep the
/// first occurrence. Fails when the roster yields nothing.
pub fn did_roster(path: &Path) -> Result<Vec<Did>, CoreError> {
    if !path.is_file() {
        return Err(CoreError::FileMissing {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let dids = parse_roster(&text);
    if dids.is_empty() {
        return Err(CoreError::NoEntities {
            source_name: format!("{} (DID roster)", path.display()),
        });
    }
    debug!(count = dids.len(), "DIDs from roster");
    Ok(dids)
}

/// Pure parse of roster text, deduplicated by DID, sorted by DID.
fn parse_roster(text: &str) -> Vec<Did> {
    let mut seen = BTreeSet::new();
    let mut dids: Vec<Did> = text
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
            match parts.as_slice() {
                [did, country, account, ip, ..] if !did.is_empty() => Some(Did {
                    did: (*did).to_owned(),
                    country: (*country).to_owned(),
                    account: (*account).to_owned(),
                    overflow_ip: (*ip).to_owned(),
                }),
                _ => None,
            }
        })
        .filter(|d| seen.insert(d.did.clone()))
        .collect();
    dids.sort_by(|a, b| a.did.cmp(&b.did));
    dids
}
