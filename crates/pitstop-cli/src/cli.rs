//! Command-line argument wrappers and the command handler
//!
//! Argument structures carry the clap derives and convert into the core
//! parameter types, so the core stays free of CLI framework concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → ChecklistService
//! ```
//!
//! The [`Cli`] handler runs a parsed command against the service and renders
//! the resulting display wrapper through the terminal renderer.

use std::{fs::File, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::{civil::Date, tz::TimeZone, Timestamp};
use pitstop_core::{
    display::{AuditTrail, ChecklistDetail},
    models::{ChecklistStatus, DefectItem},
    params::*,
    ChecklistService, Checklists, CreateResult, DeleteResult, FinalizeResult,
    OperationStatus, UpdateResult,
};

use crate::renderer::TerminalRenderer;

/// Parses an RFC 3339 timestamp, or a plain `YYYY-MM-DD` date taken as local
/// midnight.
fn parse_instant(value: &str) -> Result<Timestamp, String> {
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Ok(timestamp);
    }
    let date: Date = value
        .parse()
        .map_err(|e| format!("expected an RFC 3339 timestamp or YYYY-MM-DD date: {e}"))?;
    date.to_zoned(TimeZone::system())
        .map(|zoned| zoned.timestamp())
        .map_err(|e| e.to_string())
}

// ============================================================================
// Checklist commands
// ============================================================================

/// Create a new draft checklist for a vehicle
///
/// Only one draft or in-progress checklist may exist per plate; finalize the
/// current one before creating another.
#[derive(Args)]
pub struct CreateChecklistArgs {
    /// Vehicle plate; stored trimmed and uppercased
    pub plate: String,
    #[arg(short, long, help = "Supplier performing the maintenance")]
    pub supplier: Option<String>,
    #[arg(long, help = "Description of the service to perform")]
    pub service: Option<String>,
    #[arg(short, long, help = "Initial notes; HTML tags are stripped")]
    pub notes: Option<String>,
    #[arg(
        short,
        long = "defect",
        help = "Defect noticed on arrival (repeat for several)"
    )]
    pub defects: Vec<String>,
}

impl From<CreateChecklistArgs> for CreateChecklist {
    fn from(val: CreateChecklistArgs) -> Self {
        CreateChecklist {
            vehicle_plate: val.plate,
            supplier_id: val.supplier,
            service: val.service,
            notes: val.notes,
            defect_items: val.defects.into_iter().map(DefectItem::new).collect(),
        }
    }
}

/// Identify a single checklist
#[derive(Args)]
pub struct ChecklistIdArgs {
    #[arg(help = "Unique identifier of the checklist")]
    pub id: u64,
}

impl From<ChecklistIdArgs> for Id {
    fn from(val: ChecklistIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit the payload of a draft or in-progress checklist
///
/// Notes are replaced; defects, photos and budget documents are appended.
#[derive(Args)]
pub struct SaveChecklistArgs {
    #[arg(help = "Unique identifier of the checklist to edit")]
    pub id: u64,
    #[arg(short, long, help = "Replacement notes; an empty value clears them")]
    pub notes: Option<String>,
    #[arg(short, long = "defect", help = "Defect to append (repeatable)")]
    pub defects: Vec<String>,
    #[arg(short, long = "photo", help = "Storage path of a photo to attach (repeatable)")]
    pub photos: Vec<String>,
    #[arg(
        short,
        long = "budget",
        help = "Storage path of a budget document to attach (repeatable)"
    )]
    pub budgets: Vec<String>,
    #[arg(long, help = "Storage path of the fuel gauge photo taken on arrival")]
    pub fuel_entry: Option<String>,
    #[arg(long, help = "Storage path of the fuel gauge photo taken on departure")]
    pub fuel_exit: Option<String>,
}

impl From<SaveChecklistArgs> for SaveChecklist {
    fn from(val: SaveChecklistArgs) -> Self {
        SaveChecklist {
            id: val.id,
            notes: val.notes,
            add_defects: val.defects.into_iter().map(DefectItem::new).collect(),
            add_photos: val.photos,
            add_budgets: val.budgets,
            fuel_entry: val.fuel_entry,
            fuel_exit: val.fuel_exit,
        }
    }
}

/// Delete a checklist permanently
#[derive(Args)]
pub struct DeleteChecklistArgs {
    #[arg(help = "Unique identifier of the checklist to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteChecklistArgs> for DeleteChecklist {
    fn from(val: DeleteChecklistArgs) -> Self {
        DeleteChecklist {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum ChecklistCommands {
    /// Create a new draft checklist
    #[command(alias = "c")]
    Create(CreateChecklistArgs),
    /// Start maintenance on a draft checklist
    #[command(alias = "o")]
    Open(ChecklistIdArgs),
    /// Show details of a checklist
    #[command(alias = "s")]
    Show(ChecklistIdArgs),
    /// Edit notes, defects, photos, budgets or fuel gauge photos
    #[command(alias = "e")]
    Save(SaveChecklistArgs),
    /// Finalize and lock a checklist
    #[command(alias = "f")]
    Finalize(ChecklistIdArgs),
    /// Reopen a finalized checklist for further edits
    Reopen(ChecklistIdArgs),
    /// Delete a checklist permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteChecklistArgs),
    /// Show the audit trail of finalize and reopen transitions
    #[command(alias = "h")]
    History(ChecklistIdArgs),
}

// ============================================================================
// List and report commands
// ============================================================================

/// List in-progress checklists, most recently started first
#[derive(Args)]
pub struct ListInProgressArgs {
    #[arg(short, long, help = "Case-insensitive plate substring")]
    pub plate: Option<String>,
    #[arg(short, long, help = "Case-insensitive supplier substring")]
    pub supplier: Option<String>,
    #[arg(long, help = "Only checklists open for at least this many hours")]
    pub min_hours: Option<f64>,
}

impl From<ListInProgressArgs> for ListInProgress {
    fn from(val: ListInProgressArgs) -> Self {
        ListInProgress {
            plate: val.plate,
            supplier: val.supplier,
            min_hours: val.min_hours,
        }
    }
}

/// List finalized checklists, most recently finished first
#[derive(Args)]
pub struct ListFinishedArgs {
    #[arg(short, long, help = "Case-insensitive plate substring")]
    pub plate: Option<String>,
    #[arg(long, value_parser = parse_instant, help = "Finished at or after (timestamp or YYYY-MM-DD)")]
    pub from: Option<Timestamp>,
    #[arg(long, value_parser = parse_instant, help = "Finished at or before (timestamp or YYYY-MM-DD)")]
    pub to: Option<Timestamp>,
}

impl From<ListFinishedArgs> for ListFinished {
    fn from(val: ListFinishedArgs) -> Self {
        ListFinished {
            plate: val.plate,
            from: val.from,
            to: val.to,
        }
    }
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Checklists currently in progress
    #[command(alias = "ip")]
    InProgress(ListInProgressArgs),
    /// Finalized checklists
    #[command(alias = "f")]
    Finished(ListFinishedArgs),
}

/// Command-line representation of checklist status values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Draft,
    InProgress,
    Finalized,
}

impl From<StatusArg> for ChecklistStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Draft => ChecklistStatus::Draft,
            StatusArg::InProgress => ChecklistStatus::InProgress,
            StatusArg::Finalized => ChecklistStatus::Finalized,
        }
    }
}

/// Maintenance time report over checklists created in a range
#[derive(Args)]
pub struct ReportArgs {
    #[arg(long, help = "Only checklists in this status")]
    pub status: Option<StatusArg>,
    #[arg(long, help = "Case-insensitive plate substring")]
    pub vehicle: Option<String>,
    #[arg(long, help = "Case-insensitive supplier substring")]
    pub supplier: Option<String>,
    #[arg(long, value_parser = parse_instant, help = "Created at or after (timestamp or YYYY-MM-DD)")]
    pub from: Option<Timestamp>,
    #[arg(long, value_parser = parse_instant, help = "Created at or before (timestamp or YYYY-MM-DD)")]
    pub to: Option<Timestamp>,
    #[arg(long, value_name = "PATH", help = "Export rows as CSV to PATH (- for stdout)")]
    pub csv: Option<PathBuf>,
}

impl From<&ReportArgs> for ReportParams {
    fn from(val: &ReportArgs) -> Self {
        ReportParams {
            status: val.status.map(Into::into),
            vehicle: val.vehicle.clone(),
            supplier: val.supplier.clone(),
            from: val.from,
            to: val.to,
        }
    }
}

// ============================================================================
// Handler
// ============================================================================

/// Runs parsed commands against the checklist service.
pub struct Cli {
    service: ChecklistService,
    renderer: TerminalRenderer,
    actor: Option<String>,
}

impl Cli {
    pub fn new(service: ChecklistService, renderer: TerminalRenderer, actor: Option<String>) -> Self {
        Self {
            service,
            renderer,
            actor,
        }
    }

    fn transition(&self, args: ChecklistIdArgs) -> Transition {
        Transition {
            id: args.id,
            actor: self.actor.clone(),
        }
    }

    pub async fn handle_checklist_command(&self, command: ChecklistCommands) -> Result<()> {
        match command {
            ChecklistCommands::Create(args) => {
                let params = CreateChecklist::from(args);
                let checklist = self
                    .service
                    .create(&params)
                    .await
                    .context("Failed to create checklist")?;
                self.renderer
                    .render(&CreateResult::new(checklist).to_string())
            }
            ChecklistCommands::Open(args) => {
                let Id { id } = args.into();
                let checklist = self
                    .service
                    .open(id)
                    .await
                    .with_context(|| format!("Failed to open checklist {id}"))?;
                self.renderer
                    .render(&UpdateResult::new(checklist, Timestamp::now()).to_string())
            }
            ChecklistCommands::Show(args) => {
                let Id { id } = args.into();
                let checklist = self.service.get(id).await?;
                self.renderer
                    .render(&ChecklistDetail::new(&checklist, Timestamp::now()).to_string())
            }
            ChecklistCommands::Save(args) => {
                let params = SaveChecklist::from(args);
                let changes = describe_changes(&params);
                let checklist = self
                    .service
                    .save(&params)
                    .await
                    .with_context(|| format!("Failed to save checklist {}", params.id))?;
                let result = UpdateResult::with_changes(checklist, Timestamp::now(), changes);
                self.renderer.render(&result.to_string())
            }
            ChecklistCommands::Finalize(args) => {
                let params = self.transition(args);
                let outcome = self
                    .service
                    .finalize(&params)
                    .await
                    .with_context(|| format!("Failed to finalize checklist {}", params.id))?;
                self.renderer
                    .render(&FinalizeResult::new(params.id, outcome).to_string())
            }
            ChecklistCommands::Reopen(args) => {
                let params = self.transition(args);
                let checklist = self
                    .service
                    .reopen(&params)
                    .await
                    .with_context(|| format!("Failed to reopen checklist {}", params.id))?;
                let result = UpdateResult::with_changes(
                    checklist,
                    Timestamp::now(),
                    vec!["Reopened; previous maintenance time discarded".to_string()],
                );
                self.renderer.render(&result.to_string())
            }
            ChecklistCommands::Delete(args) => {
                let params = DeleteChecklist::from(args);
                let checklist = self.service.get(params.id).await?;
                self.service
                    .delete(&params)
                    .await
                    .with_context(|| format!("Failed to delete checklist {}", params.id))?;
                self.renderer
                    .render(&DeleteResult::new(checklist).to_string())
            }
            ChecklistCommands::History(args) => {
                let Id { id } = args.into();
                let entries = self.service.history(id).await?;
                self.renderer.render(&format!(
                    "# History of checklist {id}\n\n{}",
                    AuditTrail(entries)
                ))
            }
        }
    }

    pub async fn handle_list_command(&self, command: ListCommands) -> Result<()> {
        match command {
            ListCommands::InProgress(args) => self.list_in_progress(&args.into()).await,
            ListCommands::Finished(args) => {
                let params = ListFinished::from(args);
                let checklists = self.service.list_finished(&params).await?;
                let checklists = Checklists::new(checklists, Timestamp::now());
                self.renderer
                    .render(&format!("# Finished checklists\n\n{checklists}"))
            }
        }
    }

    pub async fn list_in_progress(&self, params: &ListInProgress) -> Result<()> {
        let (checklists, now) = self.service.list_in_progress(params).await?;
        let checklists = Checklists::new(checklists, now);
        self.renderer
            .render(&format!("# In-progress checklists\n\n{checklists}"))
    }

    pub async fn report(&self, args: ReportArgs) -> Result<()> {
        let report = self.service.report(&ReportParams::from(&args)).await?;

        match args.csv {
            Some(path) if path.as_os_str() == "-" => {
                report.write_csv(io::stdout().lock())?;
                Ok(())
            }
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                report.write_csv(file)?;
                self.renderer.render(&report.to_string())?;
                let status = OperationStatus::success(format!(
                    "Wrote {} rows to {}",
                    report.rows.len(),
                    path.display()
                ));
                self.renderer.render(&status.to_string())
            }
            None => self.renderer.render(&report.to_string()),
        }
    }
}

/// Human-readable summary of a save request.
fn describe_changes(params: &SaveChecklist) -> Vec<String> {
    let mut changes = Vec::new();
    match params.notes.as_deref() {
        Some("") => changes.push("Notes cleared".to_string()),
        Some(_) => changes.push("Notes updated".to_string()),
        None => {}
    }
    for (count, label) in [
        (params.add_defects.len(), "defect"),
        (params.add_photos.len(), "photo"),
        (params.add_budgets.len(), "budget document"),
    ] {
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            changes.push(format!("Added {count} {label}{plural}"));
        }
    }
    if params.fuel_entry.is_some() {
        changes.push("Fuel gauge entry photo set".to_string());
    }
    if params.fuel_exit.is_some() {
        changes.push("Fuel gauge exit photo set".to_string());
    }
    changes
}
