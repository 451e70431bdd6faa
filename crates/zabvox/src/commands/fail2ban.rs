//! Fail2ban subcommand handlers.

use zabvox_core::ExistsPolicy;
use zabvox_core::suites::fail2ban::fail2ban_items;

use crate::cli::{Fail2banArgs, Fail2banCommand, GlobalOpts};
use crate::commands::{Session, util};
use crate::error::CliError;

pub async fn handle(
    args: Fail2banArgs,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        Fail2banCommand::Items => {
            let drafts = fail2ban_items(&session.host.hostid);
            util::run_items(session, drafts, ExistsPolicy::CreateOnly, global).await
        }
    }
}
