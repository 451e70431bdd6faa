//! Config subcommand handlers (no server connection required).

use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// Resolved settings view; the password is never echoed.
#[derive(Debug, Serialize)]
struct ConfigView {
    profile: Option<String>,
    url: Option<String>,
    username: Option<String>,
    password_set: bool,
    host: Option<String>,
    insecure: bool,
    timeout: u64,
    config_file: String,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let config = config::load_config_or_default();
            let view = resolve_view(global, &config);
            let rendered = match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&view)
                    .map_err(|e| CliError::Validation {
                        field: "config".into(),
                        reason: e.to_string(),
                    })?,
                OutputFormat::Table | OutputFormat::Plain => render_view(&view),
            };
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let config = config::load_config_or_default();
            let mut names: Vec<&String> = config.profiles.keys().collect();
            names.sort_unstable();
            let default = config.default_profile.as_deref();
            let lines: Vec<String> = names
                .iter()
                .map(|name| {
                    if Some(name.as_str()) == default {
                        format!("{name} (default)")
                    } else {
                        (*name).clone()
                    }
                })
                .collect();
            let rendered = if lines.is_empty() {
                "(no profiles configured)".to_owned()
            } else {
                lines.join("\n")
            };
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn resolve_view(global: &GlobalOpts, config: &Config) -> ConfigView {
    let profile_name = config::active_profile_name(global, config);
    let profile = profile_name.as_ref().and_then(|n| config.profiles.get(n));

    let field = |flag: Option<&str>, from_profile: Option<&str>| {
        flag.map(str::to_owned).or_else(|| from_profile.map(str::to_owned))
    };

    ConfigView {
        url: field(global.url.as_deref(), profile.and_then(|p| p.url.as_deref())),
        username: field(
            global.username.as_deref(),
            profile.and_then(|p| p.username.as_deref()),
        ),
        password_set: global.password.is_some()
            || profile.is_some_and(|p| p.password.is_some()),
        host: field(global.host.as_deref(), profile.and_then(|p| p.host.as_deref())),
        insecure: global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false),
        timeout: global.timeout,
        config_file: config::config_path().display().to_string(),
        profile: profile_name,
    }
}

fn render_view(view: &ConfigView) -> String {
    let unset = || "(unset)".to_owned();
    [
        format!("profile:     {}", view.profile.clone().unwrap_or_else(unset)),
        format!("url:         {}", view.url.clone().unwrap_or_else(unset)),
        format!("username:    {}", view.username.clone().unwrap_or_else(unset)),
        format!("password:    {}", if view.password_set { "(set)" } else { "(unset)" }),
        format!("host:        {}", view.host.clone().unwrap_or_else(unset)),
        format!("insecure:    {}", view.insecure),
        format!("timeout:     {}s", view.timeout),
        format!("config file: {}", view.config_file),
    ]
    .join("\n")
}
