mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zabvox_api::ZabbixClient;

use crate::cli::{Cli, Command};
use crate::commands::Session;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.quiet);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never touch the server
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "zabvox", &mut std::io::stdout());
            Ok(())
        }

        // Everything else needs an authenticated session and a target host
        cmd => {
            let settings = config::resolve(&cli.global)?;
            let session = open_session(&settings).await?;

            tracing::debug!(command = ?cmd, host = %session.host.host, "dispatching command");
            commands::dispatch(cmd, &session, &cli.global).await
        }
    }
}

/// Authenticate and resolve the target host.
///
/// Transport failures at this stage become `ConnectionFailed` so the
/// help text points at the endpoint rather than the operation.
async fn open_session(settings: &config::Settings) -> Result<Session, CliError> {
    let mut client =
        ZabbixClient::new(settings.url.clone(), &settings.options).map_err(|e| connect_err(settings, e))?;

    client
        .login(&settings.username, &settings.password)
        .await
        .map_err(|e| connect_err(settings, e))?;

    let host = client.host_by_name(&settings.host).await?;
    Ok(Session {
        client,
        host,
        options: settings.options.clone(),
    })
}

fn connect_err(settings: &config::Settings, err: zabvox_api::Error) -> CliError {
    if matches!(err, zabvox_api::Error::Transport(_)) {
        CliError::ConnectionFailed {
            url: settings.url.to_string(),
            source: Box::new(err),
        }
    } else {
        err.into()
    }
}
