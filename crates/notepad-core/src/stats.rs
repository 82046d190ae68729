//! Collection summary shown on the statistics screen.

use serde::{Deserialize, Serialize};

use crate::models::Note;

/// Window for counting a note as recently updated (Unix ms).
pub const RECENT_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStats {
    pub total: usize,
    pub pinned: usize,
    /// Notes updated within the last 24 hours
    pub recent: usize,
}

impl NoteStats {
    /// Summarize `notes` relative to `now` (Unix ms).
    #[must_use]
    pub fn collect(notes: &[Note], now: i64) -> Self {
        let cutoff = now.saturating_sub(RECENT_WINDOW_MS);
        Self {
            total: notes.len(),
            pinned: notes.iter().filter(|note| note.is_pinned).count(),
            recent: notes.iter().filter(|note| note.updated_at > cutoff).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_at(updated_at: i64, pinned: bool) -> Note {
        Note {
            created_at: updated_at,
            updated_at,
            is_pinned: pinned,
            ..Note::default()
        }
    }

    #[test]
    fn counts_pinned_and_recent() {
        let now = 10 * RECENT_WINDOW_MS;
        let notes = vec![
            note_at(now - 1_000, true),
            note_at(now - RECENT_WINDOW_MS - 1, true),
            note_at(now - RECENT_WINDOW_MS, false),
            note_at(now - 5, false),
        ];

        assert_eq!(
            NoteStats::collect(&notes, now),
            NoteStats {
                total: 4,
                pinned: 2,
                recent: 2,
            }
        );
    }

    #[test]
    fn empty_collection() {
        assert_eq!(NoteStats::collect(&[], 0), NoteStats::default());
    }
}
