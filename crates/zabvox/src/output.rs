//! Run-report rendering: per-entity lines, summary table, JSON, plain.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};
use zabvox_core::{Action, Outcome};

use crate::cli::OutputFormat;

// ── Outcome rendering ────────────────────────────────────────────────

/// Render a provisioning outcome in the chosen format.
///
/// - `table`: one marker line per entity plus a summary table
/// - `json`: the full report serialized via serde
/// - `plain`: `STATUS<TAB>key` per line (scripting)
pub fn render_outcome(format: OutputFormat, outcome: &Outcome) -> String {
    match format {
        OutputFormat::Table => render_table(outcome),
        OutputFormat::Json => render_json(outcome),
        OutputFormat::Plain => outcome
            .records
            .iter()
            .map(|r| format!("{}\t{}", status_word(&r.action), r.key))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_table(outcome: &Outcome) -> String {
    let mut lines: Vec<String> = outcome
        .records
        .iter()
        .map(|r| {
            let marker = colored_marker(&r.action);
            let detail = match &r.action {
                Action::Created { id } | Action::Updated { id } => format!("id={id}"),
                Action::Skipped => "exists".into(),
                Action::Failed { error } => error.clone(),
            };
            format!("{marker:>14}  {}  ({})  {detail}", r.key, r.label)
        })
        .collect();

    let summary = SummaryRow {
        created: outcome.summary.created,
        updated: outcome.summary.updated,
        skipped: outcome.summary.skipped,
        errors: outcome.summary.errors,
        total: outcome.summary.total(),
    };
    lines.push(String::new());
    lines.push(Table::new([summary]).with(Style::rounded()).to_string());
    lines.join("\n")
}

#[derive(Tabled)]
struct SummaryRow {
    created: usize,
    updated: usize,
    skipped: usize,
    errors: usize,
    total: usize,
}

fn render_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

// `{:>14}` pads the colored marker; ANSI codes inflate its width, which
// is why the pad is wider than the longest word.
fn colored_marker(action: &Action) -> String {
    match action {
        Action::Created { .. } => "OK".green().bold().to_string(),
        Action::Updated { .. } => "UPD".cyan().bold().to_string(),
        Action::Skipped => "SKIP".yellow().to_string(),
        Action::Failed { .. } => "ERR".red().bold().to_string(),
    }
}

fn status_word(action: &Action) -> &'static str {
    match action {
        Action::Created { .. } => "created",
        Action::Updated { .. } => "updated",
        Action::Skipped => "skipped",
        Action::Failed { .. } => "failed",
    }
}

// ── Dry-run plan rendering ───────────────────────────────────────────

/// One planned object of a dry run.
#[derive(Debug, Serialize)]
pub struct PlanEntry {
    /// `item` or `trigger`.
    pub kind: &'static str,
    pub key: String,
    pub label: String,
}

pub fn render_plan(format: OutputFormat, plan: &[PlanEntry]) -> String {
    match format {
        OutputFormat::Table => {
            let mut lines: Vec<String> = plan
                .iter()
                .map(|p| format!("{:>14}  {}  ({})", "PLAN".blue(), p.key, p.label))
                .collect();
            lines.push(format!("\n{} objects would be ensured (dry run)", plan.len()));
            lines.join("\n")
        }
        OutputFormat::Json => render_json(&plan),
        OutputFormat::Plain => plan
            .iter()
            .map(|p| format!("plan\t{}", p.key))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Print to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zabvox_core::{Record, Summary};

    use super::*;

    fn outcome() -> Outcome {
        Outcome {
            records: vec![
                Record {
                    key: "asterisk.Movistar".into(),
                    label: "Movistar".into(),
                    action: Action::Created { id: "101".into() },
                },
                Record {
                    key: "asterisk.Telmex".into(),
                    label: "Telmex".into(),
                    action: Action::Skipped,
                },
            ],
            summary: Summary {
                created: 1,
                updated: 0,
                skipped: 1,
                errors: 0,
            },
        }
    }

    #[test]
    fn plain_output_is_one_line_per_record() {
        let rendered = render_outcome(OutputFormat::Plain, &outcome());
        assert_eq!(rendered, "created\tasterisk.Movistar\nskipped\tasterisk.Telmex");
    }

    #[test]
    fn json_output_carries_the_summary() {
        let rendered = render_outcome(OutputFormat::Json, &outcome());
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["summary"]["created"], 1);
        assert_eq!(value["records"][1]["action"], "skipped");
    }

    #[test]
    fn table_output_ends_with_the_summary_table() {
        let rendered = render_outcome(OutputFormat::Table, &outcome());
        assert!(rendered.contains("asterisk.Movistar"));
        assert!(rendered.contains("total"));
    }
}
