use notepad_core::editor::{EditorSession, NoteDraft};
use notepad_core::NoteStore;

use crate::commands::common::{capture_editor_input_with_initial, parse_color, parse_note_id};
use crate::error::CliError;

#[derive(Debug, Default)]
pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub tags: Vec<String>,
    pub clear_tags: bool,
}

impl EditOptions {
    const fn has_field_changes(&self) -> bool {
        self.title.is_some()
            || self.content.is_some()
            || self.category.is_some()
            || self.color.is_some()
            || !self.tags.is_empty()
            || self.clear_tags
    }
}

/// Apply flag edits to `draft`; fields without a flag are left untouched.
pub fn apply_edit_options(draft: &mut NoteDraft, options: EditOptions) -> Result<(), CliError> {
    if let Some(color) = options.color.as_deref() {
        draft.color = parse_color(color)?;
    }
    if let Some(title) = options.title {
        draft.title = title;
    }
    if let Some(content) = options.content {
        draft.content = content;
    }
    if let Some(category) = options.category {
        draft.category = category;
    }
    if options.clear_tags {
        draft.tags.clear();
    } else if !options.tags.is_empty() {
        draft.tags = options.tags;
    }
    Ok(())
}

pub async fn run_edit(store: &NoteStore, options: EditOptions) -> Result<(), CliError> {
    let note_id = parse_note_id(&options.id)?;
    let (mut session, original) = EditorSession::open(store.clone(), Some(note_id), None, false)
        .await
        .map_err(|error| match error {
            notepad_core::Error::NotFound(_) => CliError::NoteNotFound(note_id.to_string()),
            other => CliError::Core(other),
        })?;

    let mut draft = original.clone();
    if options.has_field_changes() {
        apply_edit_options(&mut draft, options)?;
    } else {
        draft.content = capture_editor_input_with_initial(&original.content)?.unwrap_or_default();
    }

    if draft == original {
        println!("{note_id}");
        return Ok(());
    }

    let saved = session.save(draft).await?;
    println!("{saved}");
    Ok(())
}
