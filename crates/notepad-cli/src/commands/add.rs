use chrono::Local;
use notepad_core::util::normalize_text_option;
use notepad_core::{Note, NoteStore};

use crate::commands::common::{
    parse_color, parse_reminder_time, resolve_note_content, resolve_note_title,
};
use crate::error::CliError;

#[derive(Debug, Default)]
pub struct AddOptions {
    pub title: Vec<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub tags: Vec<String>,
    pub pin: bool,
    pub remind_at: Option<String>,
}

pub async fn run_add(store: &NoteStore, options: AddOptions) -> Result<(), CliError> {
    let title = resolve_note_title(&options.title)?;
    let content = resolve_note_content(options.content.as_deref())?;

    let mut note = Note::new(title, content)
        .with_category(options.category.unwrap_or_default())
        .with_tags(&options.tags)
        .pinned(options.pin);
    if let Some(color) = normalize_text_option(options.color) {
        note = note.with_color(parse_color(&color)?);
    }
    if let Some(remind_at) = normalize_text_option(options.remind_at) {
        note = note.with_reminder(Some(parse_reminder_time(&remind_at, Local::now())?));
    }

    let id = store.insert_note(note).await?;
    println!("{id}");
    Ok(())
}
