use chrono::Utc;
use notepad_core::stats::NoteStats;
use notepad_core::NoteStore;

use crate::error::CliError;

pub async fn collect_stats(store: &NoteStore) -> Result<NoteStats, CliError> {
    let notes = store.list_notes().await?;
    Ok(NoteStats::collect(&notes, Utc::now().timestamp_millis()))
}

pub async fn run_stats(store: &NoteStore, as_json: bool) -> Result<(), CliError> {
    let stats = collect_stats(store).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Total notes:   {}", stats.total);
        println!("Pinned:        {}", stats.pinned);
        println!("Updated today: {}", stats.recent);
    }
    Ok(())
}
