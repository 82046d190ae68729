use chrono::Utc;
use notepad_core::{Note, NoteStore};

use crate::commands::common::{format_timestamp, note_preview, print_notes};
use crate::error::CliError;

pub async fn run_reminders(store: &NoteStore, as_json: bool) -> Result<(), CliError> {
    let notes = store
        .list_upcoming_reminders(Utc::now().timestamp_millis())
        .await?;

    if as_json {
        return print_notes(&notes, true);
    }
    for line in format_reminder_lines(&notes) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_reminder_lines(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .filter_map(|note| {
            let reminder_time = note.reminder_time?;
            Some(format!(
                "{}  {:>5}  {}",
                format_timestamp(reminder_time),
                note.id.get(),
                note_preview(note, 48)
            ))
        })
        .collect()
}
