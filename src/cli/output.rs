//! Output formatting helpers for CLI commands

use crate::api::{InvokeResponse, TaxonomyResponse};
use crate::engine::TriageResult;
use crate::grounding::MatchKind;
use crate::routing::Branch;
use crate::taxonomy::TaxonomyRegistry;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Format a triage result as a two-column table
pub fn format_triage_table(result: &TriageResult) -> String {
    let classification = result.classification();
    let provenance = classification.provenance();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    let field = |value: String, kind: MatchKind| {
        if kind.is_grounded() {
            value
        } else {
            format!("{} ({})", value, kind.as_str().yellow())
        }
    };

    table.add_row(vec![Cell::new("Ticket"), Cell::new(&result.ticket_id)]);
    table.add_row(vec![
        Cell::new("Department"),
        Cell::new(field(
            classification.department().to_string(),
            provenance.department,
        )),
    ]);
    table.add_row(vec![
        Cell::new("Severity"),
        Cell::new(field(
            classification.severity().to_string(),
            provenance.severity,
        )),
    ]);
    table.add_row(vec![
        Cell::new("Action"),
        Cell::new(field(classification.action().to_string(), provenance.action)),
    ]);
    table.add_row(vec![
        Cell::new("Grounded"),
        Cell::new(grounded_label(classification.grounded())),
    ]);
    table.add_row(vec![
        Cell::new("Branch"),
        Cell::new(branch_label(result.decision.branch())),
    ]);
    table.add_row(vec![
        Cell::new("Reason"),
        Cell::new(result.decision.reason_code()),
    ]);
    table.add_row(vec![
        Cell::new("Dispatch"),
        Cell::new(format!(
            "{} {}",
            outcome_icon(result.action_outcome.success),
            result.action_outcome.target
        )),
    ]);
    table.add_row(vec![
        Cell::new("Result"),
        Cell::new(&result.action_outcome.message),
    ]);
    if !classification.rationale().is_empty() {
        table.add_row(vec![
            Cell::new("Rationale"),
            Cell::new(classification.rationale()),
        ]);
    }
    if result.degraded {
        table.add_row(vec![
            Cell::new("Degraded"),
            Cell::new("classifier unavailable, defaults used".red().to_string()),
        ]);
    }

    table.to_string()
}

/// Format a triage result as JSON: the full result plus the earlier
/// response shape under `summary`.
pub fn format_triage_json(result: &TriageResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "result": result,
        "summary": InvokeResponse::from(result),
    }))
}

/// Format the taxonomy as a table, defaults marked with `*`
pub fn format_taxonomy_table(registry: &TaxonomyRegistry) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Members", "Default"]);

    for info in TaxonomyResponse::from_registry(registry).categories {
        let members: Vec<String> = info
            .members
            .iter()
            .map(|m| {
                if *m == info.default {
                    format!("{}*", m)
                } else {
                    m.to_string()
                }
            })
            .collect();
        table.add_row(vec![
            Cell::new(info.category),
            Cell::new(members.join(", ")),
            Cell::new(info.default),
        ]);
    }

    table.to_string()
}

/// Format the taxonomy as JSON
pub fn format_taxonomy_json(registry: &TaxonomyRegistry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TaxonomyResponse::from_registry(registry))
}

fn branch_label(branch: Branch) -> String {
    match branch {
        Branch::StandardLogging => branch.as_str().green().to_string(),
        Branch::CriticalEscalation => branch.as_str().red().bold().to_string(),
    }
}

fn grounded_label(grounded: bool) -> String {
    if grounded {
        "yes".green().to_string()
    } else {
        "no".yellow().to_string()
    }
}

/// Icon for a dispatch outcome
pub fn outcome_icon(success: bool) -> &'static str {
    if success {
        "✓"
    } else {
        "✗"
    }
}
