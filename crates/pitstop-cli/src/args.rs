use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ChecklistCommands, ListCommands, ReportArgs};

/// Maintenance checklist tracker for vehicle workshops
///
/// Pitstop records each vehicle's stay in the workshop as a checklist that
/// moves from draft to in progress to finalized. Finalizing stamps the finish
/// time, computes the maintenance duration and locks the record against
/// further edits until it is explicitly reopened.
#[derive(Parser)]
#[command(version, about, name = "pitstop")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/pitstop/pitstop.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip the atomic finalize/reopen transactions. Finalize falls back to
    /// separate writes and reopen becomes unavailable.
    #[arg(long, global = true)]
    pub no_privileged: bool,

    /// Who is performing finalize or reopen, recorded in the audit trail
    #[arg(long, global = true)]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Pitstop CLI
///
/// - `checklist`: lifecycle and payload operations on a single checklist
/// - `list`: in-progress and finished checklists
/// - `report`: maintenance time report, optionally exported as CSV
#[derive(Subcommand)]
pub enum Commands {
    /// Manage checklists
    #[command(alias = "c")]
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommands,
    },
    /// List checklists
    #[command(aliases = ["l", "ls"])]
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Maintenance time report
    #[command(alias = "r")]
    Report(ReportArgs),
}
