//! Data models for Modern Notepad

mod color;
mod note;
mod settings;
mod sort;

pub use color::{NoteColor, ParseColorError, DEFAULT_COLOR};
pub use note::{
    normalize_category, normalize_tags, Note, NoteId, SyncStatus, DEFAULT_CATEGORY,
    QUICK_NOTE_TITLE,
};
pub use settings::{EditorBackground, Settings, ThemeMode, ViewMode};
pub use sort::{sort_notes, SortOrder};
