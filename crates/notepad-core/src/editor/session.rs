use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::autosave::AutoSaver;
use crate::error::{Error, Result};
use crate::models::{normalize_category, normalize_tags, Note, NoteColor, NoteId};
use crate::services::NoteStore;

/// Editor field values, trimmed before they reach the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub color: NoteColor,
    pub tags: Vec<String>,
}

impl NoteDraft {
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category.clone(),
            color: note.color,
            tags: note.tags.clone(),
        }
    }

    #[must_use]
    fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            category: normalize_category(&self.category),
            color: self.color,
            tags: normalize_tags(&self.tags),
        }
    }

    fn apply_to(self, note: &mut Note) {
        note.title = self.title;
        note.content = self.content;
        note.category = self.category;
        note.color = self.color;
        note.tags = self.tags;
    }

    fn into_note(self) -> Note {
        Note::new(self.title, self.content)
            .with_category(self.category)
            .with_color(self.color)
            .with_tags(self.tags)
    }
}

/// One open editor over a new or existing note.
///
/// The first save inserts the note; later saves update it in place.
pub struct EditorSession {
    store: NoteStore,
    // Persisted id, shared with in-flight auto-saves
    note_id: Arc<Mutex<Option<NoteId>>>,
    auto_saver: Option<AutoSaver>,
}

impl EditorSession {
    /// Open an editor for `existing` or for a blank note in `initial_color`.
    pub async fn open(
        store: NoteStore,
        existing: Option<NoteId>,
        initial_color: Option<NoteColor>,
        auto_save: bool,
    ) -> Result<(Self, NoteDraft)> {
        let draft = match existing {
            Some(id) => {
                let note = store
                    .get_note(id)
                    .await?
                    .ok_or_else(|| Error::NotFound(id.to_string()))?;
                NoteDraft::from_note(&note)
            }
            None => NoteDraft {
                color: initial_color.unwrap_or_default(),
                ..NoteDraft::default()
            },
        };

        let session = Self {
            store,
            note_id: Arc::new(Mutex::new(existing)),
            auto_saver: auto_save.then(AutoSaver::default),
        };
        Ok((session, draft))
    }

    /// Use a different auto-save delay.
    #[must_use]
    pub fn with_auto_save_delay(mut self, delay: Duration) -> Self {
        if self.auto_saver.is_some() {
            self.auto_saver = Some(AutoSaver::new(delay));
        }
        self
    }

    /// Record an edit. With auto-save enabled, the draft is saved once
    /// editing goes idle. Drafts without a title are never auto-saved.
    pub fn edit(&mut self, draft: NoteDraft) {
        let Some(auto_saver) = self.auto_saver.as_mut() else {
            return;
        };

        let draft = draft.normalized();
        if draft.title.is_empty() {
            auto_saver.cancel();
            return;
        }

        let store = self.store.clone();
        let note_id = Arc::clone(&self.note_id);
        auto_saver.schedule(async move {
            match persist(&store, &note_id, draft).await {
                Ok(id) => tracing::debug!(%id, "Auto-saved note"),
                Err(error) => tracing::warn!("Auto-save failed: {error}"),
            }
        });
    }

    /// Save immediately, superseding any pending auto-save.
    pub async fn save(&mut self, draft: NoteDraft) -> Result<NoteId> {
        if let Some(auto_saver) = self.auto_saver.as_mut() {
            auto_saver.cancel();
        }

        let draft = draft.normalized();
        if draft.title.is_empty() {
            return Err(Error::InvalidInput("title cannot be empty".to_string()));
        }
        persist(&self.store, &self.note_id, draft).await
    }

    /// Whether an auto-save is waiting to fire.
    #[must_use]
    pub fn has_pending_save(&self) -> bool {
        self.auto_saver
            .as_ref()
            .is_some_and(AutoSaver::is_pending)
    }

    /// Id of the persisted note, if it has been saved.
    pub async fn note_id(&self) -> Option<NoteId> {
        *self.note_id.lock().await
    }

    /// Leave the editor, dropping any pending auto-save.
    pub fn close(&mut self) {
        if let Some(auto_saver) = self.auto_saver.as_mut() {
            auto_saver.cancel();
        }
    }
}

async fn persist(
    store: &NoteStore,
    note_id: &Mutex<Option<NoteId>>,
    draft: NoteDraft,
) -> Result<NoteId> {
    // Held across the write so an explicit save and an auto-save never both insert
    let mut note_id = note_id.lock().await;

    if let Some(id) = *note_id {
        let mut note = store
            .get_note(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        draft.apply_to(&mut note);
        note.touch();
        if !store.update_note(note).await? {
            return Err(Error::NotFound(id.to_string()));
        }
        return Ok(id);
    }

    let id = store.insert_note(draft.into_note()).await?;
    *note_id = Some(id);
    Ok(id)
}
