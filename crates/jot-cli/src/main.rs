//! jot CLI - host shell for the note store
//!
//! Stands in for the single-screen UI: validates input, calls the store,
//! renders the list, and releases the handle on exit.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};
use jot_core::{NoteStore, StoreConfig};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::delete::run_delete;
use crate::commands::export::run_export;
use crate::commands::list::run_list;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jot=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    if cli.command.is_none() && cli.note.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let config = StoreConfig::from_env(cli.data_dir);
    if !config.db_exists() {
        tracing::info!("Creating note database at {}", config.db_path().display());
    }

    let store = NoteStore::new(&config);
    if let Some(path) = store.path() {
        tracing::debug!("Using note database {}", path.display());
    }
    store.initialize().await?;

    let result = dispatch(cli.command, &cli.note, &store).await;

    // Release the handle even when the command failed
    if let Err(error) = store.close().await {
        tracing::warn!("Failed to close note store: {error}");
    }
    result
}

async fn dispatch(
    command: Option<Commands>,
    quick_note: &[String],
    store: &NoteStore,
) -> Result<(), CliError> {
    match command {
        Some(Commands::Add { content }) => run_add(&content, store).await,
        Some(Commands::List { json }) => run_list(json, store).await,
        Some(Commands::Delete { id }) => run_delete(&id, store).await,
        Some(Commands::Export { format, output }) => {
            run_export(format, output.as_deref(), store).await
        }
        None => run_add(quick_note, store).await,
    }
}
