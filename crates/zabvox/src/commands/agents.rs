//! Wolkvox agents subcommand handlers.

use zabvox_core::ExistsPolicy;
use zabvox_core::discovery::http::AgentFeed;
use zabvox_core::suites::agents::latency_items;

use crate::cli::{AgentsArgs, AgentsCommand, GlobalOpts};
use crate::commands::{Session, util};
use crate::error::CliError;

pub async fn handle(
    args: AgentsArgs,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AgentsCommand::Latency {
            api_url,
            server,
            token,
        } => {
            let feed = AgentFeed {
                api_url,
                server,
                token,
                timeout: session.options.timeout,
                verify_tls: session.options.verify_tls,
            };
            // Discovery runs even under --dry-run; it is read-only.
            let agents = feed.agents().await?;
            let drafts = latency_items(&session.host.hostid, &agents);
            util::run_items(session, drafts, ExistsPolicy::Upsert, global).await
        }
    }
}
