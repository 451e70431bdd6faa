//! Idempotent provisioning engine.
//!
//! One generic pipeline replaces the per-suite copy-paste: a suite builds a
//! list of drafts (item or trigger payloads with their unique key), and the
//! engine walks them in sorted order, re-deriving existence from the server
//! on every run (read-before-write, no local cache). Discovery has already
//! completed fully by the time drafts reach this module.
//!
//! Two on-exists policies coexist on purpose and stay explicitly named:
//! `CreateOnly` (every item/trigger suite except one) and `Upsert`
//! (agent-latency and audit-log items overwrite attributes on every run).

use serde::Serialize;
use tracing::{debug, warn};
use zabvox_api::{Host, ItemUpdate, NewItem, NewTrigger, ZabbixClient};

use crate::error::CoreError;

// ── Drafts ───────────────────────────────────────────────────────────

/// A fully-built item payload plus its identity.
///
/// `key` is derived deterministically from the entity id and a fixed
/// namespace prefix, so one entity maps to at most one object per run.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub key: String,
    /// Human-readable handle for run output (peer name, DID, agent code).
    pub label: String,
    pub item: NewItem,
}

/// A fully-built trigger payload; the description is the uniqueness anchor.
#[derive(Debug, Clone)]
pub struct TriggerDraft {
    pub description: String,
    pub label: String,
    pub trigger: NewTrigger,
}

// ── Policies and outcomes ────────────────────────────────────────────

/// What to do when the object already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistsPolicy {
    /// Skip without modification (create-missing-only).
    CreateOnly,
    /// Overwrite attributes to the desired state (upsert-always).
    Upsert,
}

/// Per-entity outcome of one provisioning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Created { id: String },
    Updated { id: String },
    Skipped,
    /// The create/update call failed; the loop continued.
    Failed { error: String },
}

/// One line of the run report.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub key: String,
    pub label: String,
    pub action: Action,
}

/// Aggregate counters printed at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.errors
    }

    pub fn clean(&self) -> bool {
        self.errors == 0
    }

    fn count(&mut self, action: &Action) {
        match action {
            Action::Created { .. } => self.created += 1,
            Action::Updated { .. } => self.updated += 1,
            Action::Skipped => self.skipped += 1,
            Action::Failed { .. } => self.errors += 1,
        }
    }
}

/// Result of one engine pass: per-entity records plus the tally.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub records: Vec<Record>,
    pub summary: Summary,
}

// ── Item pass ────────────────────────────────────────────────────────

/// Provision items: for each draft, look up by key; create when absent,
/// and on existence either skip or overwrite per `policy`.
///
/// Per-entity failures are recorded and the loop continues; only the
/// existence lookup itself failing is treated the same way (the entity is
/// counted as an error, not the run aborted). Drafts are processed in
/// sorted-key order for deterministic output.
pub async fn apply_items(
    client: &ZabbixClient,
    drafts: Vec<ItemDraft>,
    policy: ExistsPolicy,
) -> Outcome {
    let mut drafts = drafts;
    drafts.sort_by(|a, b| a.key.cmp(&b.key));

    let mut records = Vec::with_capacity(drafts.len());
    let mut summary = Summary::default();

    for draft in drafts {
        let action = apply_one_item(client, &draft, policy).await;
        if let Action::Failed { error } = &action {
            warn!(key = %draft.key, %error, "item provisioning failed");
        }
        summary.count(&action);
        records.push(Record {
            key: draft.key,
            label: draft.label,
            action,
        });
    }

    Outcome { records, summary }
}

async fn apply_one_item(client: &ZabbixClient, draft: &ItemDraft, policy: ExistsPolicy) -> Action {
    let existing = match client.item_by_key(&draft.item.hostid, &draft.key).await {
        Ok(existing) => existing,
        Err(e) => return Action::Failed { error: e.to_string() },
    };

    match (existing, policy) {
        (None, _) => match client.create_item(&draft.item).await {
            Ok(id) => {
                debug!(key = %draft.key, %id, "item created");
                Action::Created { id }
            }
            Err(e) => Action::Failed { error: e.to_string() },
        },
        (Some(_), ExistsPolicy::CreateOnly) => Action::Skipped,
        (Some(found), ExistsPolicy::Upsert) => {
            let update = overwrite_from(&draft.item, found.itemid.clone());
            match client.update_item(&update).await {
                Ok(()) => {
                    debug!(key = %draft.key, id = %found.itemid, "item updated");
                    Action::Updated { id: found.itemid }
                }
                Err(e) => Action::Failed { error: e.to_string() },
            }
        }
    }
}

/// Project a create payload onto the attribute set `item.update` rewrites.
fn overwrite_from(item: &NewItem, itemid: String) -> ItemUpdate {
    ItemUpdate {
        itemid,
        name: item.name.clone(),
        item_type: item.item_type,
        value_type: item.value_type,
        units: item.units.clone(),
        history: item.history.clone(),
        trends: item.trends.clone(),
        description: item.description.clone(),
    }
}

// ── Trigger pass ─────────────────────────────────────────────────────

/// Provision triggers: a description collision is always a skip, never a
/// duplicate -- there is no upsert for triggers.
pub async fn apply_triggers(
    client: &ZabbixClient,
    host: &Host,
    drafts: Vec<TriggerDraft>,
) -> Outcome {
    let mut drafts = drafts;
    drafts.sort_by(|a, b| a.description.cmp(&b.description));

    let mut records = Vec::with_capacity(drafts.len());
    let mut summary = Summary::default();

    for draft in drafts {
        let action = apply_one_trigger(client, host, &draft).await;
        if let Action::Failed { error } = &action {
            warn!(description = %draft.description, %error, "trigger provisioning failed");
        }
        summary.count(&action);
        records.push(Record {
            key: draft.description,
            label: draft.label,
            action,
        });
    }

    Outcome { records, summary }
}

async fn apply_one_trigger(client: &ZabbixClient, host: &Host, draft: &TriggerDraft) -> Action {
    match client.trigger_exists(&host.hostid, &draft.description).await {
        Ok(true) => Action::Skipped,
        Ok(false) => match client.create_trigger(&draft.trigger).await {
            Ok(id) => {
                debug!(description = %draft.description, %id, "trigger created");
                Action::Created { id }
            }
            Err(e) => Action::Failed { error: e.to_string() },
        },
        Err(e) => Action::Failed { error: e.to_string() },
    }
}

/// Delete every trigger on the host whose description starts with `prefix`.
///
/// The audit suite re-creates its trigger set from the catalog on every
/// run; stale descriptions from renamed alert types would otherwise
/// accumulate forever.
pub async fn delete_triggers_with_prefix(
    client: &ZabbixClient,
    host: &Host,
    prefix: &str,
) -> Result<usize, CoreError> {
    let stale = client
        .triggers_with_description_prefix(&host.hostid, prefix)
        .await?;
    let ids: Vec<String> = stale.into_iter().map(|t| t.triggerid).collect();
    let count = ids.len();
    client.delete_triggers(&ids).await?;
    Ok(count)
}
