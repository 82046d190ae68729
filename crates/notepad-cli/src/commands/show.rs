use notepad_core::{Note, NoteStore};

use crate::commands::common::{color_label, find_note, format_timestamp, render_tags};
use crate::error::CliError;

pub async fn run_show(store: &NoteStore, id: &str, as_json: bool) -> Result<(), CliError> {
    let note = find_note(store, id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("{}", render_note_details(&note));
    }
    Ok(())
}

pub fn render_note_details(note: &Note) -> String {
    let mut lines = vec![
        note.title.clone(),
        String::new(),
        note.content.clone(),
        String::new(),
        format!("id:        {}", note.id),
        format!("category:  {}", note.category),
        format!("color:     {}", color_label(note.color)),
    ];
    if !note.tags.is_empty() {
        lines.push(format!("tags:      {}", render_tags(note)));
    }
    if note.is_pinned {
        lines.push("pinned:    yes".to_string());
    }
    if let Some(reminder_time) = note.reminder_time {
        lines.push(format!("reminder:  {}", format_timestamp(reminder_time)));
    }
    lines.push(format!("created:   {}", format_timestamp(note.created_at)));
    lines.push(format!("updated:   {}", format_timestamp(note.updated_at)));
    lines.join("\n")
}
