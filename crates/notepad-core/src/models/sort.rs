//! Client-side orderings for note listings

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::note::Note;

/// Ordering applied to an already-fetched list of notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Pinned first, then most recently updated (the store's native order)
    #[default]
    Date,
    /// Pinned first, then case-insensitive title
    Title,
    /// Pinned first, then grouped by color
    Color,
}

impl SortOrder {
    /// Compare two notes under this ordering
    #[must_use]
    pub fn compare(self, a: &Note, b: &Note) -> Ordering {
        let pinned_first = b.is_pinned.cmp(&a.is_pinned);
        let key = match self {
            Self::Date => b.updated_at.cmp(&a.updated_at),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::Color => a.color.cmp(&b.color),
        };
        pinned_first.then(key).then_with(|| b.id.cmp(&a.id))
    }
}

/// Sort notes in place
pub fn sort_notes(notes: &mut [Note], order: SortOrder) {
    notes.sort_by(|a, b| order.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteColor, NoteId};

    fn note(id: i64, title: &str, updated_at: i64, pinned: bool) -> Note {
        let mut note = Note::new(title, "").pinned(pinned);
        note.id = NoteId::new(id);
        note.created_at = 0;
        note.updated_at = updated_at;
        note
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn date_order_keeps_pinned_first() {
        let mut notes = vec![
            note(1, "old", 10, false),
            note(2, "pinned", 5, true),
            note(3, "new", 20, false),
        ];
        sort_notes(&mut notes, SortOrder::Date);
        assert_eq!(titles(&notes), vec!["pinned", "new", "old"]);
    }

    #[test]
    fn title_order_is_case_insensitive() {
        let mut notes = vec![
            note(1, "banana", 1, false),
            note(2, "Apple", 2, false),
            note(3, "cherry", 3, false),
        ];
        sort_notes(&mut notes, SortOrder::Title);
        assert_eq!(titles(&notes), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn color_order_groups_colors() {
        let red = NoteColor::from_argb(0xFFF4_4336);
        let blue = NoteColor::from_argb(0xFF21_96F3);
        let mut notes = vec![
            note(1, "r1", 1, false).with_color(red),
            note(2, "b", 2, false).with_color(blue),
            note(3, "r2", 3, false).with_color(red),
        ];
        sort_notes(&mut notes, SortOrder::Color);
        assert_eq!(titles(&notes), vec!["b", "r2", "r1"]);
    }
}
