//! Pitstop CLI Application
//!
//! Command-line interface for tracking vehicle maintenance checklists.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use pitstop_core::{params::ListInProgress, ServiceBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        no_privileged,
        actor,
        command,
    } = Args::parse();

    let service = ServiceBuilder::new()
        .with_database_path(database_file)
        .with_privileged_ops(!no_privileged)
        .build()
        .await
        .context("Failed to initialize checklist store")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!(
        "Pitstop started with database {}",
        service.database_path().display()
    );

    let cli = Cli::new(service, renderer, actor);
    match command {
        Some(Checklist { command }) => cli.handle_checklist_command(command).await,
        Some(List { command }) => cli.handle_list_command(command).await,
        Some(Report(args)) => cli.report(args).await,
        None => cli.list_in_progress(&ListInProgress::default()).await,
    }
}
