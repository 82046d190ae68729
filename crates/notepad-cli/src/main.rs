//! Notepad CLI - Command-line interface for taking and organizing notes
//!
//! Quick capture from the terminal with minimal friction.

mod cli;
mod commands;
mod error;


use clap::{CommandFactory, Parser};
use notepad_core::NoteStore;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::{run_add, AddOptions};
use crate::commands::category::run_category;
use crate::commands::common::{open_database, resolve_db_path};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::{run_edit, EditOptions};
use crate::commands::export::run_export;
use crate::commands::list::{run_list, ListOptions};
use crate::commands::pin::run_pin;
use crate::commands::quick::run_quick;
use crate::commands::reminders::run_reminders;
use crate::commands::search::run_search;
use crate::commands::share::run_share;
use crate::commands::show::run_show;
use crate::commands::stats::run_stats;
use crate::commands::tags::run_tags;
use crate::commands::watch::run_watch;
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
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notepad=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())
        }
        None if cli.note.is_empty() => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
            Ok(())
        }
        command => {
            let db_path = resolve_db_path(cli.db_path);
            let store = open_database(&db_path).await?;
            let result = dispatch(&store, command, cli.note).await;
            store.close().await?;
            result
        }
    }
}

async fn dispatch(
    store: &NoteStore,
    command: Option<Commands>,
    quick_title: Vec<String>,
) -> Result<(), CliError> {
    match command {
        Some(Commands::Add {
            title,
            content,
            category,
            color,
            tags,
            pin,
            remind_at,
        }) => {
            run_add(
                store,
                AddOptions {
                    title,
                    content,
                    category,
                    color,
                    tags,
                    pin,
                    remind_at,
                },
            )
            .await
        }
        Some(Commands::Quick) => run_quick(store).await,
        Some(Commands::List {
            category,
            color,
            sort,
            limit,
            json,
        }) => {
            run_list(
                store,
                ListOptions {
                    category,
                    color,
                    sort,
                    limit,
                    json,
                },
            )
            .await
        }
        Some(Commands::Show { id, json }) => run_show(store, &id, json).await,
        Some(Commands::Search {
            pattern,
            limit,
            json,
        }) => run_search(store, &pattern, limit, json).await,
        Some(Commands::Edit {
            id,
            title,
            content,
            category,
            color,
            tags,
            clear_tags,
        }) => {
            run_edit(
                store,
                EditOptions {
                    id,
                    title,
                    content,
                    category,
                    color,
                    tags,
                    clear_tags,
                },
            )
            .await
        }
        Some(Commands::Delete { id }) => run_delete(store, &id).await,
        Some(Commands::Pin { id }) => run_pin(store, &id, true).await,
        Some(Commands::Unpin { id }) => run_pin(store, &id, false).await,
        Some(Commands::Share { id }) => run_share(store, &id).await,
        Some(Commands::Category { command }) => run_category(store, command).await,
        Some(Commands::Tags { json }) => run_tags(store, json).await,
        Some(Commands::Reminders { json }) => run_reminders(store, json).await,
        Some(Commands::Stats { json }) => run_stats(store, json).await,
        Some(Commands::Export { format, output }) => {
            run_export(store, format, output.as_deref()).await
        }
        Some(Commands::Watch { category, search }) => {
            run_watch(store, category.as_deref(), search.as_deref()).await
        }
        Some(Commands::Config { command }) => run_config(store, command).await,
        Some(Commands::Completions { shell, output }) => run_completions(shell, output.as_deref()),
        // Quick capture mode: notepad "note title"
        None => {
            run_add(
                store,
                AddOptions {
                    title: quick_title,
                    ..AddOptions::default()
                },
            )
            .await
        }
    }
}
