//! Command dispatch: bridges CLI args -> discovery + drafts -> engine ->
//! output formatting.

pub mod agents;
pub mod audit;
pub mod config_cmd;
pub mod did;
pub mod fail2ban;
pub mod peers;
pub mod util;

use zabvox_api::{ClientOptions, Host, ZabbixClient};
use zabvox_core::suites::peers::Tech;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// An authenticated client plus the resolved target host.
///
/// `options` keeps the resolved transport settings around for discovery
/// strategies that open their own connections (the Wolkvox feed).
pub struct Session {
    pub client: ZabbixClient,
    pub host: Host,
    pub options: ClientOptions,
}

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Sip(args) => peers::handle(Tech::Sip, args.command, session, global).await,
        Command::Pjsip(args) => peers::handle(Tech::Pjsip, args.command, session, global).await,
        Command::Did(args) => did::handle(args, session, global).await,
        Command::Agents(args) => agents::handle(args, session, global).await,
        Command::Audit(args) => audit::handle(args, session, global).await,
        Command::Fail2ban(args) => fail2ban::handle(args, session, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
