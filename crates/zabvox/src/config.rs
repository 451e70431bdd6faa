//! CLI-owned configuration: TOML profiles and resolution into connection
//! settings.
//!
//! Resolution order for every setting is flag > environment > profile
//! (clap handles the flag/env tiers via `env =` attributes; this module
//! supplies the profile tier and the defaults).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;
use zabvox_api::ClientOptions;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when --profile is not given.
    pub default_profile: Option<String>,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Zabbix API endpoint (`.../api_jsonrpc.php`).
    pub url: Option<String>,

    pub username: Option<String>,

    /// Plaintext password -- prefer ZBXPROV_PASSWORD.
    pub password: Option<String>,

    /// Default target host for this profile.
    pub host: Option<String>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "kiwano-ops", "zabvox")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("zabvox");
            p.push("config.toml");
            p
        })
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("ZBXPROV_CONFIG_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to empty defaults when the file is absent.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Resolution ───────────────────────────────────────────────────────

/// Everything needed to open an authenticated session against one host.
#[derive(Debug)]
pub struct Settings {
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub host: String,
    pub options: ClientOptions,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> Option<String> {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
}

/// Merge flags (with their env fallbacks) over the active profile.
pub fn resolve(global: &GlobalOpts) -> Result<Settings, CliError> {
    let config = load_config_or_default();

    let profile = match active_profile_name(global, &config) {
        Some(name) => Some(config.profiles.get(&name).ok_or_else(|| {
            let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
                path: config_path().display().to_string(),
            }
        })?),
        None => None,
    };

    let url_str = pick(global.url.as_deref(), profile.and_then(|p| p.url.as_deref()))
        .ok_or_else(|| missing("url", "ZBXPROV_URL"))?;
    let url: Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let username = pick(
        global.username.as_deref(),
        profile.and_then(|p| p.username.as_deref()),
    )
    .ok_or_else(|| missing("username", "ZBXPROV_USERNAME"))?
    .to_owned();

    let password = pick(
        global.password.as_deref(),
        profile.and_then(|p| p.password.as_deref()),
    )
    .ok_or_else(|| missing("password", "ZBXPROV_PASSWORD"))?;
    let password = SecretString::from(password.to_owned());

    let host = pick(global.host.as_deref(), profile.and_then(|p| p.host.as_deref()))
        .ok_or_else(|| missing("host", "ZBXPROV_HOST"))?
        .to_owned();

    let insecure = global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false);
    let timeout = profile
        .and_then(|p| p.timeout)
        .filter(|_| global.timeout == 30)
        .unwrap_or(global.timeout);

    Ok(Settings {
        url,
        username,
        password,
        host,
        options: ClientOptions {
            verify_tls: !insecure,
            timeout: Duration::from_secs(timeout),
        },
    })
}

fn pick<'a>(flag: Option<&'a str>, profile: Option<&'a str>) -> Option<&'a str> {
    flag.filter(|s| !s.is_empty()).or(profile)
}

fn missing(name: &str, env: &str) -> CliError {
    CliError::MissingSetting {
        name: name.to_owned(),
        env: env.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn global() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            url: Some("http://zbx/zabbix/api_jsonrpc.php".into()),
            username: Some("Admin".into()),
            password: Some("zabbix".into()),
            host: Some("gatewayp".into()),
            output: crate::cli::OutputFormat::Table,
            verbose: 0,
            quiet: false,
            insecure: false,
            timeout: 30,
            dry_run: false,
        }
    }

    #[test]
    fn flags_alone_resolve() {
        let settings = resolve(&global()).unwrap();
        assert_eq!(settings.host, "gatewayp");
        assert_eq!(settings.username, "Admin");
        assert!(settings.options.verify_tls);
    }

    #[test]
    fn missing_url_is_reported_with_its_env_var() {
        let mut g = global();
        g.url = None;
        match resolve(&g) {
            Err(CliError::MissingSetting { name, env }) => {
                assert_eq!(name, "url");
                assert_eq!(env, "ZBXPROV_URL");
            }
            other => panic!("expected MissingSetting, got {other:?}"),
        }
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let mut g = global();
        g.url = Some("not a url".into());
        assert!(matches!(resolve(&g), Err(CliError::Validation { .. })));
    }
}
