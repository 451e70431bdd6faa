//! SIP / PJSIP subcommand handlers (shared across both technologies).

use std::collections::BTreeSet;
use std::path::Path;

use zabvox_core::discovery::{exec, file};
use zabvox_core::suites::peers::{
    Tech, calls_items, status_item_candidates, status_items, status_triggers,
};
use zabvox_core::{CoreError, ExistsPolicy};

use crate::cli::{CallsSource, GlobalOpts, PeerCommand};
use crate::commands::{Session, util};
use crate::error::CliError;

pub async fn handle(
    tech: Tech,
    cmd: PeerCommand,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        PeerCommand::Items { asterisk_bin } => {
            let discovered = discover_console(tech, &asterisk_bin).await?;
            let interface = session.client.agent_interface(&session.host).await?;
            let drafts = status_items(
                &session.host.hostid,
                &interface.interfaceid,
                tech,
                &discovered,
            );
            util::run_items(session, drafts, ExistsPolicy::CreateOnly, global).await
        }

        PeerCommand::Calls {
            agent_conf,
            source,
            asterisk_bin,
            extra,
        } => {
            let discovered = match source {
                CallsSource::AgentConf => {
                    // The scanner expects the namespace without its trailing dot.
                    let prefix = tech.calls_key_prefix().trim_end_matches('.');
                    file::userparameter_ids(&agent_conf, prefix, &extra)?
                }
                CallsSource::Console => {
                    let mut set: BTreeSet<String> =
                        discover_console(tech, &asterisk_bin).await?.into_iter().collect();
                    set.extend(extra.iter().filter(|e| !e.is_empty()).cloned());
                    set.into_iter().collect()
                }
            };
            let interface = session.client.agent_interface(&session.host).await?;
            let drafts = calls_items(
                &session.host.hostid,
                &interface.interfaceid,
                tech,
                &discovered,
            );
            util::run_items(session, drafts, ExistsPolicy::CreateOnly, global).await
        }

        PeerCommand::Triggers { trigger_prefix } => {
            let prefix = trigger_prefix.unwrap_or_else(|| tech.trigger_prefix().to_owned());
            let items = session
                .client
                .items_with_key_prefix(&session.host.hostid, tech.status_key_prefix())
                .await?;
            let candidates = status_item_candidates(tech, items);
            if candidates.is_empty() {
                return Err(CoreError::NoEntities {
                    source_name: format!(
                        "existing {}* items on '{}'",
                        tech.status_name_prefix(),
                        session.host.host
                    ),
                }
                .into());
            }
            let drafts = status_triggers(tech, &session.host, &candidates, &prefix);
            util::run_triggers(session, drafts, global).await
        }
    }
}

async fn discover_console(tech: Tech, asterisk_bin: &Path) -> Result<Vec<String>, CliError> {
    let discovered = match tech {
        Tech::Sip => exec::sip_peers(asterisk_bin).await?,
        Tech::Pjsip => exec::pjsip_endpoints(asterisk_bin).await?,
    };
    Ok(discovered)
}
