//! Thread-safe note store shared across callers.
//!
//! All storage work runs on tokio's blocking pool behind a single connection
//! lock, so callers can await store operations from any async context. Every
//! mutation bumps a revision counter; live queries re-run on each bump.

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use super::live::LiveQuery;
use crate::db::{
    Database, NoteRepository, SettingsRepository, SqliteNoteRepository, SqliteSettingsRepository,
};
use crate::error::{Error, Result};
use crate::models::{Note, NoteColor, NoteId, Settings};

/// Handle to the durable note collection.
///
/// Constructed explicitly with [`NoteStore::open`] and shut down with
/// [`NoteStore::close`]. Clones share the same connection.
#[derive(Clone)]
pub struct NoteStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    db: Mutex<Option<Database>>,
    revision: watch::Sender<u64>,
    // Last `PRAGMA data_version` seen; `i64::MIN` until first checked
    data_version: AtomicI64,
}

impl StoreInner {
    fn lock(&self) -> Result<MutexGuard<'_, Option<Database>>> {
        self.db
            .lock()
            .map_err(|_| Error::Database("note database lock poisoned".to_string()))
    }
}

impl NoteStore {
    /// Open a store backed by the database file at `db_path`.
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = tokio::task::spawn_blocking(move || Database::open(&db_path)).await??;
        Ok(Self::from_database(db))
    }

    /// Open an in-memory store (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = tokio::task::spawn_blocking(Database::open_in_memory).await??;
        Ok(Self::from_database(db))
    }

    /// Wrap an already opened database.
    pub fn from_database(db: Database) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                db: Mutex::new(Some(db)),
                revision,
                data_version: AtomicI64::new(i64::MIN),
            }),
        }
    }

    /// Close the underlying connection.
    ///
    /// Later calls fail with [`Error::Closed`] and live queries stop updating.
    /// Closing twice is a no-op.
    pub async fn close(&self) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let closed = tokio::task::spawn_blocking(move || -> Result<bool> {
            let Some(db) = inner.lock()?.take() else {
                return Ok(false);
            };
            db.close()?;
            Ok(true)
        })
        .await??;

        if closed {
            self.notify();
        }
        Ok(())
    }

    /// Whether the store still has an open connection.
    pub fn is_open(&self) -> bool {
        self.inner.lock().is_ok_and(|db| db.is_some())
    }

    /// Refresh live queries if another process committed to the database
    /// since the previous check. The first call only records a baseline.
    pub async fn detect_external_changes(&self) -> Result<bool> {
        let inner = Arc::clone(&self.inner);
        let changed = self
            .with_database(move |db| {
                let version = db.data_version()?;
                let previous = inner.data_version.swap(version, Ordering::SeqCst);
                Ok(previous != i64::MIN && previous != version)
            })
            .await?;

        if changed {
            tracing::debug!("Detected external database changes");
            self.notify();
        }
        Ok(changed)
    }

    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let guard = inner.lock()?;
            let db = guard.as_ref().ok_or(Error::Closed)?;
            operation(db)
        })
        .await?
    }

    async fn read<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&SqliteNoteRepository<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.with_database(move |db| operation(&SqliteNoteRepository::new(db.connection())))
            .await
    }

    async fn write<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&SqliteNoteRepository<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let result = self.read(operation).await?;
        self.notify();
        Ok(result)
    }

    fn notify(&self) {
        self.inner
            .revision
            .send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    async fn watch<T, F>(&self, query: F) -> Result<LiveQuery<T>>
    where
        F: Fn(&SqliteNoteRepository<'_>) -> Result<T> + Send + Sync + 'static,
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        let query = Arc::new(query);
        // Subscribe before the first read so no mutation slips in between
        let mut revisions = self.inner.revision.subscribe();

        let initial = {
            let query = Arc::clone(&query);
            self.read(move |repo| query(repo)).await?
        };
        let (sender, receiver) = watch::channel(initial);

        let store = self.clone();
        let refresh = tokio::spawn(async move {
            while revisions.changed().await.is_ok() {
                let query = Arc::clone(&query);
                match store.read(move |repo| query(repo)).await {
                    Ok(snapshot) => {
                        sender.send_if_modified(|current| {
                            if *current == snapshot {
                                false
                            } else {
                                *current = snapshot;
                                true
                            }
                        });
                    }
                    Err(Error::Closed) => break,
                    Err(error) => tracing::warn!("Live query refresh failed: {error}"),
                }
            }
        });

        Ok(LiveQuery::new(receiver, refresh))
    }

    /// Fetch a note by id; `None` if it does not exist.
    pub async fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        self.read(move |repo| repo.get(id)).await
    }

    /// Persist a new note and return its assigned id.
    pub async fn insert_note(&self, note: Note) -> Result<NoteId> {
        self.write(move |repo| repo.insert(&note)).await
    }

    /// Replace a stored note; `false` if no note has that id.
    ///
    /// Callers refresh `updated_at` (see [`Note::touch`]) before calling.
    pub async fn update_note(&self, note: Note) -> Result<bool> {
        self.write(move |repo| repo.update(&note)).await
    }

    /// Delete a note; `false` if it was already gone.
    pub async fn delete_note(&self, id: NoteId) -> Result<bool> {
        self.write(move |repo| repo.delete(id)).await
    }

    /// Set the pin flag only. Does not change `updated_at`.
    pub async fn update_pin_status(&self, id: NoteId, pinned: bool) -> Result<bool> {
        self.write(move |repo| repo.set_pinned(id, pinned)).await
    }

    /// Hard-delete every note in `category`.
    pub async fn delete_notes_by_category(&self, category: &str) -> Result<usize> {
        let category = category.to_string();
        self.write(move |repo| repo.delete_by_category(&category))
            .await
    }

    /// Move all notes from `old_category` to `new_category`.
    pub async fn update_notes_category(
        &self,
        old_category: &str,
        new_category: &str,
    ) -> Result<usize> {
        let old_category = old_category.to_string();
        let new_category = new_category.to_string();
        self.write(move |repo| repo.reassign_category(&old_category, &new_category))
            .await
    }

    /// Number of notes in `category`.
    pub async fn note_count_by_category(&self, category: &str) -> Result<usize> {
        let category = category.to_string();
        self.read(move |repo| repo.count_by_category(&category))
            .await
    }

    /// All notes, pinned first then most recently updated.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        self.read(|repo| repo.list()).await
    }

    /// Notes whose title or content contains `pattern`, ignoring case.
    pub async fn search_notes(&self, pattern: &str) -> Result<Vec<Note>> {
        let pattern = pattern.to_string();
        self.read(move |repo| repo.search(&pattern)).await
    }

    pub async fn list_categories(&self) -> Result<Vec<String>> {
        self.read(|repo| repo.list_categories()).await
    }

    pub async fn category_counts(&self) -> Result<Vec<(String, usize)>> {
        self.read(|repo| repo.category_counts()).await
    }

    pub async fn list_notes_by_category(&self, category: &str) -> Result<Vec<Note>> {
        let category = category.to_string();
        self.read(move |repo| repo.list_by_category(&category))
            .await
    }

    pub async fn list_notes_by_color(&self, color: NoteColor) -> Result<Vec<Note>> {
        self.read(move |repo| repo.list_by_color(color)).await
    }

    pub async fn list_tags(&self) -> Result<Vec<String>> {
        self.read(|repo| repo.list_tags()).await
    }

    /// Notes with a reminder after `now` (Unix ms), soonest first.
    pub async fn list_upcoming_reminders(&self, now: i64) -> Result<Vec<Note>> {
        self.read(move |repo| repo.list_upcoming_reminders(now))
            .await
    }

    /// Live view of all notes.
    pub async fn watch_notes(&self) -> Result<LiveQuery<Vec<Note>>> {
        self.watch(|repo| repo.list()).await
    }

    /// Live search results.
    pub async fn watch_search(&self, pattern: &str) -> Result<LiveQuery<Vec<Note>>> {
        let pattern = pattern.to_string();
        self.watch(move |repo| repo.search(&pattern)).await
    }

    /// Live list of distinct categories.
    pub async fn watch_categories(&self) -> Result<LiveQuery<Vec<String>>> {
        self.watch(|repo| repo.list_categories()).await
    }

    pub async fn watch_notes_by_category(&self, category: &str) -> Result<LiveQuery<Vec<Note>>> {
        let category = category.to_string();
        self.watch(move |repo| repo.list_by_category(&category))
            .await
    }

    pub async fn watch_notes_by_color(&self, color: NoteColor) -> Result<LiveQuery<Vec<Note>>> {
        self.watch(move |repo| repo.list_by_color(color)).await
    }

    /// Live list of distinct tags.
    pub async fn watch_tags(&self) -> Result<LiveQuery<Vec<String>>> {
        self.watch(|repo| repo.list_tags()).await
    }

    /// Live list of reminders due after `now`.
    pub async fn watch_upcoming_reminders(&self, now: i64) -> Result<LiveQuery<Vec<Note>>> {
        self.watch(move |repo| repo.list_upcoming_reminders(now))
            .await
    }

    /// Load user preferences.
    pub async fn load_settings(&self) -> Result<Settings> {
        self.with_database(|db| SqliteSettingsRepository::new(db.connection()).load())
            .await
    }

    /// Save user preferences.
    pub async fn save_settings(&self, settings: Settings) -> Result<()> {
        self.with_database(move |db| SqliteSettingsRepository::new(db.connection()).save(&settings))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(5);

    fn titles(notes: &[Note]) -> Vec<String> {
        notes.iter().map(|n| n.title.clone()).collect()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn in_memory_insert_and_get_roundtrip() {
        let store = NoteStore::open_in_memory().await.unwrap();

        let note = Note::new("hello", "core").with_category("work");
        let id = store.insert_note(note.clone()).await.unwrap();

        let fetched = store.get_note(id).await.unwrap().unwrap();
        assert_eq!(fetched, Note { id, ..note });
        assert!(store.get_note(NoteId::new(id.get() + 1)).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn live_notes_reemit_after_insert() {
        let store = NoteStore::open_in_memory().await.unwrap();
        let mut live = store.watch_notes().await.unwrap();
        assert!(live.current().is_empty());

        store.insert_note(Note::new("first", "")).await.unwrap();

        let snapshot = timeout(WAIT, live.changed()).await.unwrap().unwrap();
        assert_eq!(titles(&snapshot), vec!["first"]);
        assert_eq!(titles(&live.current()), vec!["first"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn live_categories_follow_migration() {
        let store = NoteStore::open_in_memory().await.unwrap();
        store
            .insert_note(Note::new("a", "").with_category("A"))
            .await
            .unwrap();
        let mut live = store.watch_categories().await.unwrap();
        assert_eq!(live.current(), vec!["A"]);

        store.update_notes_category("A", "B").await.unwrap();

        let categories = timeout(WAIT, live.changed()).await.unwrap().unwrap();
        assert_eq!(categories, vec!["B"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn live_search_only_emits_on_result_change() {
        let store = NoteStore::open_in_memory().await.unwrap();
        let mut live = store.watch_search("rust").await.unwrap();

        store.insert_note(Note::new("groceries", "")).await.unwrap();
        store.insert_note(Note::new("Rust notes", "")).await.unwrap();

        let results = timeout(WAIT, live.changed()).await.unwrap().unwrap();
        assert_eq!(titles(&results), vec!["Rust notes"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn close_stops_live_queries_and_rejects_calls() {
        let store = NoteStore::open_in_memory().await.unwrap();
        let mut live = store.watch_notes().await.unwrap();

        store.close().await.unwrap();
        assert!(!store.is_open());

        assert_eq!(timeout(WAIT, live.changed()).await.unwrap(), None);
        assert!(matches!(
            store.list_notes().await,
            Err(Error::Closed)
        ));
        store.close().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn for_each_sees_initial_and_updates() {
        let store = NoteStore::open_in_memory().await.unwrap();
        let live = store.watch_tags().await.unwrap();

        let (seen_tx, mut seen_rx) = tokio::sync::mpsc::unbounded_channel();
        let observer = tokio::spawn(live.for_each(move |tags: &Vec<String>| {
            let _ = seen_tx.send(tags.clone());
        }));

        assert_eq!(
            timeout(WAIT, seen_rx.recv()).await.unwrap(),
            Some(Vec::new())
        );
        store
            .insert_note(Note::new("t", "").with_tags(["rust"]))
            .await
            .unwrap();
        assert_eq!(
            timeout(WAIT, seen_rx.recv()).await.unwrap(),
            Some(vec!["rust".to_string()])
        );

        store.close().await.unwrap();
        timeout(WAIT, observer).await.unwrap().unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn settings_roundtrip_through_store() {
        let store = NoteStore::open_in_memory().await.unwrap();
        let mut settings = store.load_settings().await.unwrap();
        settings.auto_save = false;

        store.save_settings(settings.clone()).await.unwrap();
        assert_eq!(store.load_settings().await.unwrap(), settings);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn external_writes_refresh_live_queries() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("shared.db");
        let viewer = NoteStore::open(&db_path).await.unwrap();
        let writer = NoteStore::open(&db_path).await.unwrap();

        assert!(!viewer.detect_external_changes().await.unwrap());
        let mut live = viewer.watch_notes().await.unwrap();

        writer.insert_note(Note::new("from elsewhere", "")).await.unwrap();
        assert!(viewer.detect_external_changes().await.unwrap());
        assert!(!viewer.detect_external_changes().await.unwrap());

        let snapshot = timeout(WAIT, live.changed()).await.unwrap().unwrap();
        assert_eq!(titles(&snapshot), vec!["from elsewhere"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn open_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("notes.db");

        let store = NoteStore::open(&db_path).await.unwrap();
        store.insert_note(Note::new("persisted", "")).await.unwrap();
        store.close().await.unwrap();

        let reopened = NoteStore::open(&db_path).await.unwrap();
        assert_eq!(titles(&reopened.list_notes().await.unwrap()), vec!["persisted"]);
    }
}
