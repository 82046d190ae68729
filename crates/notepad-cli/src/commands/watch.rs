use std::time::Duration;

use notepad_core::{LiveQuery, Note, NoteStore};

use crate::commands::common::format_note_lines;
use crate::error::CliError;

/// How often to look for writes made by other processes.
const EXTERNAL_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub async fn watch_query(
    store: &NoteStore,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<LiveQuery<Vec<Note>>, CliError> {
    let live = match (search.map(str::trim), category) {
        (Some(pattern), _) if !pattern.is_empty() => store.watch_search(pattern).await?,
        (_, Some(category)) => store.watch_notes_by_category(category).await?,
        _ => store.watch_notes().await?,
    };
    Ok(live)
}

pub async fn run_watch(
    store: &NoteStore,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<(), CliError> {
    let mut live = watch_query(store, category, search).await?;
    print_snapshot(&live.current());

    // Establish the baseline before polling
    store.detect_external_changes().await?;
    let mut poll = tokio::time::interval(EXTERNAL_POLL_INTERVAL);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                break;
            }
            snapshot = live.changed() => match snapshot {
                Some(notes) => print_snapshot(&notes),
                None => break,
            },
            _ = poll.tick() => {
                store.detect_external_changes().await?;
            }
        }
    }

    Ok(())
}

fn print_snapshot(notes: &[Note]) {
    println!("--- {} note(s)", notes.len());
    for line in format_note_lines(notes) {
        println!("{line}");
    }
}
