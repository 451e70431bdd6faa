//! DID subcommand handlers.

use zabvox_core::ExistsPolicy;
use zabvox_core::discovery::file;
use zabvox_core::suites::did::did_items;

use crate::cli::{DidArgs, DidCommand, GlobalOpts};
use crate::commands::{Session, util};
use crate::error::CliError;

pub async fn handle(args: DidArgs, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DidCommand::Items { roster, api_url } => {
            let dids = file::did_roster(&roster)?;
            let drafts = did_items(&session.host.hostid, &api_url, &dids);
            util::run_items(session, drafts, ExistsPolicy::CreateOnly, global).await
        }
    }
}
