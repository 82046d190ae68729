use std::io;

use notepad_core::models::ParseColorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notepad_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note title cannot be empty")]
    EmptyTitle,
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(String),
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error(transparent)]
    InvalidColor(#[from] ParseColorError),
    #[error("Invalid reminder time '{0}': use RFC 3339, \"YYYY-MM-DD HH:MM\" or +30m/+2h/+1d")]
    InvalidReminder(String),
    #[error("Invalid value '{value}' for {key}")]
    InvalidSettingValue { key: String, value: String },
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
}
