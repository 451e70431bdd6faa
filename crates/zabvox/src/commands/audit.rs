//! Audit-log subcommand handlers.

use tracing::info;

use zabvox_core::suites::audit::{audit_items, audit_triggers, trigger_prefix};
use zabvox_core::{ExistsPolicy, delete_triggers_with_prefix};

use crate::cli::{AuditArgs, AuditCommand, GlobalOpts};
use crate::commands::{Session, util};
use crate::error::CliError;

pub async fn handle(
    args: AuditArgs,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AuditCommand::Items { operation } => {
            let drafts = audit_items(&session.host.hostid, &operation);
            util::run_items(session, drafts, ExistsPolicy::Upsert, global).await
        }

        AuditCommand::Triggers { operation } => {
            let drafts = audit_triggers(&session.host, &operation);
            // Rebuild semantics: clear the operation's trigger set first so
            // renamed alert types do not leave stale triggers behind.
            if !global.dry_run {
                let deleted = delete_triggers_with_prefix(
                    &session.client,
                    &session.host,
                    &trigger_prefix(&operation),
                )
                .await?;
                info!(deleted, %operation, "removed existing audit triggers");
            }
            util::run_triggers(session, drafts, global).await
        }
    }
}
