//! Note repository implementation

use crate::error::Result;
use crate::models::{normalize_category, Note, NoteColor, NoteId, SyncStatus};
use crate::util::now_millis;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Params};

const SELECT_NOTES: &str = "SELECT id, title, content, category, color, tags, is_pinned,
        reminder_time, created_at, updated_at, sync_status
     FROM notes";

/// Pinned notes first, then most recently updated
const LISTING_ORDER: &str = "ORDER BY is_pinned DESC, updated_at DESC, id DESC";

/// Trait for note storage operations
pub trait NoteRepository {
    /// Persist a new note and return its freshly assigned id
    fn insert(&self, note: &Note) -> Result<NoteId>;

    /// Get a note by ID
    fn get(&self, id: NoteId) -> Result<Option<Note>>;

    /// List all notes in listing order
    fn list(&self) -> Result<Vec<Note>>;

    /// Replace the stored note with the same id; `false` if it does not exist
    fn update(&self, note: &Note) -> Result<bool>;

    /// Delete a note; `false` if it was already absent
    fn delete(&self, id: NoteId) -> Result<bool>;

    /// Notes whose title or content contains `pattern`, ignoring case
    fn search(&self, pattern: &str) -> Result<Vec<Note>>;

    /// Distinct categories, alphabetically
    fn list_categories(&self) -> Result<Vec<String>>;

    /// Notes in a category
    fn list_by_category(&self, category: &str) -> Result<Vec<Note>>;

    /// Notes with a given color
    fn list_by_color(&self, color: NoteColor) -> Result<Vec<Note>>;

    /// Distinct tag values across all notes, alphabetically
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Set the pin flag without touching any other column
    fn set_pinned(&self, id: NoteId, pinned: bool) -> Result<bool>;

    /// Hard-delete every note in a category
    fn delete_by_category(&self, category: &str) -> Result<usize>;

    /// Move every note from one category to another
    fn reassign_category(&self, old_category: &str, new_category: &str) -> Result<usize>;

    /// Number of notes in a category
    fn count_by_category(&self, category: &str) -> Result<usize>;

    /// Notes with a reminder after `now`, soonest first
    fn list_upcoming_reminders(&self, now: i64) -> Result<Vec<Note>>;

    /// Categories with their note counts, alphabetically
    fn category_counts(&self) -> Result<Vec<(String, usize)>>;
}

/// `SQLite` implementation of `NoteRepository`
pub struct SqliteNoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteNoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn query_notes<P: Params>(&self, clause: &str, params: P) -> Result<Vec<Note>> {
        let sql = format!("{SELECT_NOTES} {clause}");
        let mut stmt = self.conn.prepare_cached(&sql)?;

        let notes = stmt
            .query_map(params, Self::parse_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    /// Parse a note from a database row
    fn parse_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        let color: i64 = row.get(4)?;
        let tags: String = row.get(5)?;
        let sync_status: i64 = row.get(10)?;

        Ok(Note {
            id: NoteId::new(row.get(0)?),
            title: row.get(1)?,
            content: row.get(2)?,
            category: row.get(3)?,
            color: NoteColor::from_stored(color).ok_or_else(|| {
                conversion_error(4, Type::Integer, format!("color out of range: {color}"))
            })?,
            tags: serde_json::from_str(&tags).map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error))
            })?,
            is_pinned: row.get(6)?,
            reminder_time: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
            sync_status: SyncStatus::from_code(sync_status).ok_or_else(|| {
                conversion_error(
                    10,
                    Type::Integer,
                    format!("unknown sync status: {sync_status}"),
                )
            })?,
        })
    }
}

fn conversion_error(column: usize, kind: Type, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, kind, message.into())
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert(&self, note: &Note) -> Result<NoteId> {
        let now = now_millis();
        let created_at = if note.created_at > 0 {
            note.created_at
        } else {
            now
        };
        let updated_at = if note.updated_at > 0 {
            note.updated_at
        } else {
            now
        }
        .max(created_at);

        self.conn.execute(
            "INSERT INTO notes (title, content, category, color, tags, is_pinned,
                reminder_time, created_at, updated_at, sync_status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                note.title,
                note.content,
                normalize_category(&note.category),
                note.color.to_stored(),
                serde_json::to_string(&note.tags)?,
                note.is_pinned,
                note.reminder_time,
                created_at,
                updated_at,
                note.sync_status.code(),
            ],
        )?;

        let id = NoteId::new(self.conn.last_insert_rowid());
        tracing::debug!("Inserted note {id}");
        Ok(id)
    }

    fn get(&self, id: NoteId) -> Result<Option<Note>> {
        let result = self.conn.query_row(
            &format!("{SELECT_NOTES} WHERE id = ?1"),
            params![id.get()],
            Self::parse_note,
        );

        match result {
            Ok(note) => Ok(Some(note)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<Note>> {
        self.query_notes(LISTING_ORDER, [])
    }

    fn update(&self, note: &Note) -> Result<bool> {
        // created_at is immutable once stored
        let rows = self.conn.execute(
            "UPDATE notes
             SET title = ?1, content = ?2, category = ?3, color = ?4, tags = ?5,
                 is_pinned = ?6, reminder_time = ?7, updated_at = MAX(?8, created_at),
                 sync_status = ?9
             WHERE id = ?10",
            params![
                note.title,
                note.content,
                normalize_category(&note.category),
                note.color.to_stored(),
                serde_json::to_string(&note.tags)?,
                note.is_pinned,
                note.reminder_time,
                note.updated_at,
                note.sync_status.code(),
                note.id.get(),
            ],
        )?;

        if rows == 0 {
            tracing::debug!("Update skipped, note {} not found", note.id);
        }
        Ok(rows > 0)
    }

    fn delete(&self, id: NoteId) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id.get()])?;
        Ok(rows > 0)
    }

    fn search(&self, pattern: &str) -> Result<Vec<Note>> {
        self.query_notes(
            &format!("WHERE contains_ci(title, ?1) OR contains_ci(content, ?1) {LISTING_ORDER}"),
            params![pattern],
        )
    }

    fn list_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT DISTINCT category FROM notes ORDER BY category")?;

        let categories = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(categories)
    }

    fn list_by_category(&self, category: &str) -> Result<Vec<Note>> {
        self.query_notes(
            &format!("WHERE category = ?1 {LISTING_ORDER}"),
            params![category],
        )
    }

    fn list_by_color(&self, color: NoteColor) -> Result<Vec<Note>> {
        self.query_notes(
            &format!("WHERE color = ?1 {LISTING_ORDER}"),
            params![color.to_stored()],
        )
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT DISTINCT tag.value
             FROM notes, json_each(notes.tags) AS tag
             WHERE tag.type = 'text' AND TRIM(tag.value) != ''
             ORDER BY tag.value",
        )?;

        let tags = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(tags)
    }

    fn set_pinned(&self, id: NoteId, pinned: bool) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE notes SET is_pinned = ?1 WHERE id = ?2",
            params![pinned, id.get()],
        )?;
        Ok(rows > 0)
    }

    fn delete_by_category(&self, category: &str) -> Result<usize> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE category = ?1", params![category])?;
        tracing::debug!("Deleted {rows} notes in category '{category}'");
        Ok(rows)
    }

    fn reassign_category(&self, old_category: &str, new_category: &str) -> Result<usize> {
        let new_category = normalize_category(new_category);
        if old_category == new_category {
            return Ok(0);
        }

        let rows = self.conn.execute(
            "UPDATE notes SET category = ?2 WHERE category = ?1",
            params![old_category, new_category],
        )?;
        tracing::debug!("Moved {rows} notes from '{old_category}' to '{new_category}'");
        Ok(rows)
    }

    fn count_by_category(&self, category: &str) -> Result<usize> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE category = ?1",
            params![category],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn list_upcoming_reminders(&self, now: i64) -> Result<Vec<Note>> {
        self.query_notes(
            "WHERE reminder_time IS NOT NULL AND reminder_time > ?1
             ORDER BY reminder_time ASC, id ASC",
            params![now],
        )
    }

    fn category_counts(&self) -> Result<Vec<(String, usize)>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT category, COUNT(*) FROM notes GROUP BY category ORDER BY category",
        )?;

        let counts = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, usize>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{DEFAULT_CATEGORY, DEFAULT_COLOR};
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn stamped(title: &str, updated_at: i64) -> Note {
        let mut note = Note::new(title, "");
        note.created_at = 1;
        note.updated_at = updated_at;
        note
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let note = Note::new("Hello", "world")
            .with_category("work")
            .with_tags(["a", "b"])
            .with_reminder(Some(99));
        let id = repo.insert(&note).unwrap();
        assert!(id.is_persisted());

        let fetched = repo.get(id).unwrap().unwrap();
        assert_eq!(fetched, Note { id, ..note });
    }

    #[test]
    fn test_insert_ignores_incoming_id_and_never_reuses() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let mut note = Note::new("one", "");
        note.id = NoteId::new(500);
        let first = repo.insert(&note).unwrap();
        assert_ne!(first, NoteId::new(500));

        repo.delete(first).unwrap();
        let second = repo.insert(&Note::new("two", "")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_insert_fills_unset_timestamps() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let id = repo.insert(&Note::default()).unwrap();
        let stored = repo.get(id).unwrap().unwrap();
        assert!(stored.created_at > 0);
        assert!(stored.updated_at >= stored.created_at);
    }

    #[test]
    fn test_insert_clamps_updated_at_to_created_at() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let mut note = Note::new("Backdated", "");
        note.created_at = 50;
        note.updated_at = 10;
        let id = repo.insert(&note).unwrap();

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.created_at, 50);
        assert_eq!(stored.updated_at, 50);
    }

    #[test]
    fn test_insert_normalizes_blank_category() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let mut note = Note::new("Groceries", "");
        note.category = String::new();
        let id = repo.insert(&note).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().category, DEFAULT_CATEGORY);
        assert_eq!(repo.list_categories().unwrap(), vec![DEFAULT_CATEGORY]);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());
        assert!(repo.get(NoteId::new(12345)).unwrap().is_none());
    }

    #[test]
    fn test_list_orders_pinned_then_recent() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        repo.insert(&stamped("a", 100)).unwrap();
        repo.insert(&stamped("b", 200).pinned(true)).unwrap();
        repo.insert(&stamped("c", 300)).unwrap();

        assert_eq!(titles(&repo.list().unwrap()), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_update_replaces_full_record() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let id = repo.insert(&stamped("Original", 10)).unwrap();
        let mut note = repo.get(id).unwrap().unwrap();
        note.title = "Updated".to_string();
        note.content = "new body".to_string();
        note.color = NoteColor::from_argb(0xFF4C_AF50);
        note.tags = vec!["x".to_string()];
        note.is_pinned = true;
        note.reminder_time = Some(1_000);
        note.sync_status = SyncStatus::Synced;
        note.updated_at = 20;

        assert!(repo.update(&note).unwrap());
        assert_eq!(repo.get(id).unwrap().unwrap(), note);
    }

    #[test]
    fn test_update_keeps_created_at_and_clamps_updated_at() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let mut original = stamped("t", 50);
        original.created_at = 40;
        let id = repo.insert(&original).unwrap();

        let mut note = repo.get(id).unwrap().unwrap();
        note.created_at = 1;
        note.updated_at = 5;
        repo.update(&note).unwrap();

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.created_at, 40);
        assert_eq!(stored.updated_at, 40);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let mut ghost = Note::new("ghost", "");
        ghost.id = NoteId::new(77);
        assert!(!repo.update(&ghost).unwrap());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_twice_is_safe() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let id = repo.insert(&Note::new("To delete", "")).unwrap();
        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_search_title_or_content_ignoring_case() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        repo.insert(&stamped("Meeting Notes", 1)).unwrap();
        repo.insert(&Note::new("Todo", "prepare the MEETING agenda"))
            .unwrap();
        repo.insert(&Note::new("Something else", "")).unwrap();

        let results = repo.search("meeting").unwrap();
        assert_eq!(titles(&results), vec!["Todo", "Meeting Notes"]);
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        repo.insert(&Note::new("100% done", "")).unwrap();
        repo.insert(&Note::new("half done", "")).unwrap();

        assert_eq!(titles(&repo.search("0%").unwrap()), vec!["100% done"]);
        assert_eq!(repo.search("").unwrap().len(), 2);
    }

    #[test]
    fn test_categories_distinct_and_sorted() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        repo.insert(&Note::new("1", "").with_category("work")).unwrap();
        repo.insert(&Note::new("2", "").with_category("home")).unwrap();
        repo.insert(&Note::new("3", "").with_category("work")).unwrap();

        assert_eq!(repo.list_categories().unwrap(), vec!["home", "work"]);
        assert_eq!(
            repo.category_counts().unwrap(),
            vec![("home".to_string(), 1), ("work".to_string(), 2)]
        );
        assert_eq!(repo.count_by_category("work").unwrap(), 2);
        assert_eq!(repo.count_by_category("missing").unwrap(), 0);
        assert_eq!(titles(&repo.list_by_category("home").unwrap()), vec!["2"]);
    }

    #[test]
    fn test_list_by_color() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());
        let red = NoteColor::from_argb(0xFFF4_4336);

        repo.insert(&Note::new("red", "").with_color(red)).unwrap();
        repo.insert(&Note::new("plain", "")).unwrap();

        assert_eq!(titles(&repo.list_by_color(red).unwrap()), vec!["red"]);
        assert_eq!(
            titles(&repo.list_by_color(DEFAULT_COLOR).unwrap()),
            vec!["plain"]
        );
    }

    #[test]
    fn test_tags_are_flattened_and_distinct() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        repo.insert(&Note::new("1", "").with_tags(["rust", "db"]))
            .unwrap();
        repo.insert(&Note::new("2", "").with_tags(["rust"])).unwrap();
        repo.insert(&Note::new("3", "")).unwrap();

        assert_eq!(repo.list_tags().unwrap(), vec!["db", "rust"]);
    }

    #[test]
    fn test_set_pinned_is_recency_neutral() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        let id = repo.insert(&stamped("a", 100)).unwrap();
        repo.insert(&stamped("b", 200)).unwrap();

        assert!(repo.set_pinned(id, true).unwrap());
        let stored = repo.get(id).unwrap().unwrap();
        assert!(stored.is_pinned);
        assert_eq!(stored.updated_at, 100);
        assert_eq!(titles(&repo.list().unwrap()), vec!["a", "b"]);

        assert!(!repo.set_pinned(NoteId::new(999), true).unwrap());
    }

    #[test]
    fn test_reassign_and_delete_category() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        repo.insert(&Note::new("1", "").with_category("A")).unwrap();
        repo.insert(&Note::new("2", "").with_category("A")).unwrap();
        repo.insert(&Note::new("3", "").with_category("B")).unwrap();

        assert_eq!(repo.reassign_category("A", "B").unwrap(), 2);
        assert!(repo.list_by_category("A").unwrap().is_empty());
        assert_eq!(repo.list_by_category("B").unwrap().len(), 3);

        assert_eq!(repo.delete_by_category("B").unwrap(), 3);
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_reassign_to_blank_uses_default_category() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        repo.insert(&Note::new("1", "").with_category("A")).unwrap();
        assert_eq!(repo.reassign_category("A", " ").unwrap(), 1);
        assert_eq!(repo.count_by_category(DEFAULT_CATEGORY).unwrap(), 1);
        assert_eq!(repo.reassign_category("A", "A").unwrap(), 0);
    }

    #[test]
    fn test_upcoming_reminders() {
        let db = setup();
        let repo = SqliteNoteRepository::new(db.connection());

        repo.insert(&Note::new("past", "").with_reminder(Some(50)))
            .unwrap();
        repo.insert(&Note::new("later", "").with_reminder(Some(300)))
            .unwrap();
        repo.insert(&Note::new("soon", "").with_reminder(Some(200)))
            .unwrap();
        repo.insert(&Note::new("none", "")).unwrap();

        assert_eq!(
            titles(&repo.list_upcoming_reminders(100).unwrap()),
            vec!["soon", "later"]
        );
    }
}
