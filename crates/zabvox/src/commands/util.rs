//! Shared run/plan plumbing for the provisioning handlers.

use zabvox_core::{ExistsPolicy, ItemDraft, Outcome, TriggerDraft, apply_items, apply_triggers};

use crate::cli::GlobalOpts;
use crate::commands::Session;
use crate::error::CliError;
use crate::output::{self, PlanEntry};

/// Apply item drafts, or print the plan under --dry-run.
pub async fn run_items(
    session: &Session,
    drafts: Vec<ItemDraft>,
    policy: ExistsPolicy,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if global.dry_run {
        return print_plan("item", drafts.iter().map(|d| (&d.key, &d.label)), global);
    }
    let outcome = apply_items(&session.client, drafts, policy).await;
    finish(&outcome, global)
}

/// Apply trigger drafts, or print the plan under --dry-run.
pub async fn run_triggers(
    session: &Session,
    drafts: Vec<TriggerDraft>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if global.dry_run {
        return print_plan(
            "trigger",
            drafts.iter().map(|d| (&d.description, &d.label)),
            global,
        );
    }
    let outcome = apply_triggers(&session.client, &session.host, drafts).await;
    finish(&outcome, global)
}

fn print_plan<'a>(
    kind: &'static str,
    entries: impl Iterator<Item = (&'a String, &'a String)>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let plan: Vec<PlanEntry> = entries
        .map(|(key, label)| PlanEntry {
            kind,
            key: key.clone(),
            label: label.clone(),
        })
        .collect();
    output::print_output(&output::render_plan(global.output, &plan), global.quiet);
    Ok(())
}

/// Print the report; per-entity failures degrade the exit status.
fn finish(outcome: &Outcome, global: &GlobalOpts) -> Result<(), CliError> {
    output::print_output(&output::render_outcome(global.output, outcome), global.quiet);
    if outcome.summary.errors > 0 {
        return Err(CliError::PartialFailure {
            errors: outcome.summary.errors,
            total: outcome.summary.total(),
        });
    }
    Ok(())
}
