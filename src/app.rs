//! Wanted Board App
//!
//! Runs one board command: bootstrap and show cards, edit a record, or
//! delete one.

use std::io::Write;

use anyhow::{anyhow, Context};
use clap::Subcommand;

use wanted_sync_lib::commands;
use wanted_sync_lib::domain::filter_records;
use wanted_sync_lib::sync::SyncOutcome;
use wanted_sync_lib::AppState;

use crate::view;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sync the local store if stale, then print the records
    Show {
        /// Only show records containing this text
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Edit detail fields of a record; without edits, print its fields
    Update {
        id: String,
        /// `field=value` pairs, e.g. `eyes=blue heightMax=70`
        edits: Vec<String>,
    },
    /// Delete a record
    Delete {
        id: String,
        /// Skip the confirmation question
        #[arg(long, short)]
        yes: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Show { search: None }
    }
}

pub async fn run<W: Write>(state: &AppState, command: Command, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Show { search } => show(state, search.as_deref(), out).await,
        Command::Update { id, edits } => update(state, &id, &edits, out).await,
        Command::Delete { id, yes } => delete(state, &id, yes, out).await,
    }
}

async fn show<W: Write>(state: &AppState, search: Option<&str>, out: &mut W) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let boot = state.sync.bootstrap(today).await;

    match &boot.outcome {
        SyncOutcome::UpToDate { records } => log::info!("Store up to date ({} records)", records),
        SyncOutcome::Synced(report) => {
            let _ = rolling_logger::info(&format!(
                "Synced {} records, {} failed, pages skipped: {:?}",
                report.success_count(),
                report.failed.len(),
                report.skipped_pages
            ));
        }
        SyncOutcome::Aborted { reason } => {
            let _ = rolling_logger::error(&format!("Sync aborted: {}", reason));
        }
    }

    let visible = filter_records(&boot.records, search.unwrap_or(""));
    for record in &visible {
        writeln!(out, "{}", view::render_card(record))?;
    }
    writeln!(out, "{} of {} records", visible.len(), boot.records.len())?;
    Ok(())
}

async fn update<W: Write>(
    state: &AppState,
    id: &str,
    edits: &[String],
    out: &mut W,
) -> anyhow::Result<()> {
    if edits.is_empty() {
        let record = commands::get_wanted(state.repo(), id)
            .await
            .map_err(|e| anyhow!(e))?
            .ok_or_else(|| anyhow!("Record {} not found", id))?;
        write!(out, "{}", view::render_edit_form(&record))?;
        return Ok(());
    }

    let edits = edits
        .iter()
        .map(|raw| commands::parse_edit(raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow!(e))?;

    let updated = commands::update_wanted(state.repo(), id, &edits)
        .await
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("Failed to update record {}", id))?;
    log::info!("Updated record {}", updated.id);
    write!(out, "{}", view::render_card(&updated))?;
    Ok(())
}

async fn delete<W: Write>(state: &AppState, id: &str, yes: bool, out: &mut W) -> anyhow::Result<()> {
    let record = commands::get_wanted(state.repo(), id)
        .await
        .map_err(|e| anyhow!(e))?
        .ok_or_else(|| anyhow!("Record {} not found", id))?;

    if !yes {
        writeln!(out, "{}", view::render_delete_prompt(&record))?;
        writeln!(out, "Re-run with --yes to delete.")?;
        return Ok(());
    }

    commands::delete_wanted(state.repo(), id)
        .await
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("Failed to delete record {}", id))?;
    log::info!("Deleted record {}", id);
    writeln!(out, "Deleted {}", record.short_title())?;
    Ok(())
}
