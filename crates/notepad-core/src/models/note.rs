//! Note model

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::color::{NoteColor, DEFAULT_COLOR};
use crate::util::now_millis;

/// Category assigned to notes without an explicit one.
pub const DEFAULT_CATEGORY: &str = "默认";

/// Title given to notes created through quick capture.
pub const QUICK_NOTE_TITLE: &str = "快速笔记";

/// Store-assigned note identifier.
///
/// `NoteId::UNSAVED` (0) marks a note that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Placeholder id of an in-memory note
    pub const UNSAVED: Self = Self(0);

    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether the id was assigned by the store
    #[must_use]
    pub const fn is_persisted(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Sync state reserved for a future remote-sync feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    #[default]
    Unsynced,
    Synced,
    SyncFailed,
}

impl SyncStatus {
    /// Integer code stored in the `sync_status` column
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Unsynced => 0,
            Self::Synced => 1,
            Self::SyncFailed => 2,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Unsynced),
            1 => Some(Self::Synced),
            2 => Some(Self::SyncFailed),
            _ => None,
        }
    }
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Free-text grouping label
    pub category: String,
    pub color: NoteColor,
    pub tags: Vec<String>,
    pub is_pinned: bool,
    /// Reminder timestamp (Unix ms)
    pub reminder_time: Option<i64>,
    /// Creation timestamp (Unix ms); 0 means "let the store fill it in"
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
    pub sync_status: SyncStatus,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            id: NoteId::UNSAVED,
            title: String::new(),
            content: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            color: DEFAULT_COLOR,
            tags: Vec::new(),
            is_pinned: false,
            reminder_time: None,
            created_at: 0,
            updated_at: 0,
            sync_status: SyncStatus::Unsynced,
        }
    }
}

impl Note {
    /// Create an unsaved note stamped with the current time
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
            ..Self::default()
        }
    }

    /// Quick-capture note titled `快速笔记` with the local creation time as content
    #[must_use]
    pub fn quick(now: chrono::DateTime<chrono::Local>) -> Self {
        let mut note = Self::new(QUICK_NOTE_TITLE, format!("创建于 {}", now.format("%H:%M")));
        note.created_at = now.timestamp_millis();
        note.updated_at = note.created_at;
        note
    }

    #[must_use]
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = normalize_category(category.as_ref());
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: NoteColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    #[must_use]
    pub const fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    #[must_use]
    pub const fn with_reminder(mut self, reminder_time: Option<i64>) -> Self {
        self.reminder_time = reminder_time;
        self
    }

    /// Refresh `updated_at` to the current time (never earlier than `created_at`)
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.created_at);
    }

    /// Whether a reminder is set and still ahead of `now`
    #[must_use]
    pub fn has_upcoming_reminder(&self, now: i64) -> bool {
        self.reminder_time.is_some_and(|at| at > now)
    }

    /// Title truncated to `max_len` characters, falling back to the first content line
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        let source = if self.title.trim().is_empty() {
            self.content.lines().next().unwrap_or("")
        } else {
            self.title.as_str()
        };
        source.trim().chars().take(max_len).collect()
    }
}

/// Map a blank category to [`DEFAULT_CATEGORY`]
#[must_use]
pub fn normalize_category(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trim tags, drop empty ones, and remove duplicates keeping first occurrence
#[must_use]
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
