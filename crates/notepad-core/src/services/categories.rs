//! Category maintenance built on top of the note store.

use super::NoteStore;
use crate::error::{Error, Result};
use crate::models::{normalize_category, DEFAULT_CATEGORY};

/// What deleting a category would affect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDeletionPlan {
    pub category: String,
    pub note_count: usize,
}

impl CategoryDeletionPlan {
    /// Notes must be moved to the default category before deletion.
    #[must_use]
    pub const fn requires_migration(&self) -> bool {
        self.note_count > 0
    }
}

/// Outcome of [`delete_category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDeletion {
    /// Notes moved into the default category.
    pub moved: usize,
}

fn ensure_not_default(category: &str) -> Result<()> {
    if category == DEFAULT_CATEGORY {
        return Err(Error::InvalidInput(format!(
            "the default category '{DEFAULT_CATEGORY}' cannot be removed"
        )));
    }
    Ok(())
}

/// Count the notes affected by deleting `category`.
pub async fn plan_category_deletion(
    store: &NoteStore,
    category: &str,
) -> Result<CategoryDeletionPlan> {
    let note_count = store.note_count_by_category(category).await?;
    Ok(CategoryDeletionPlan {
        category: category.to_string(),
        note_count,
    })
}

/// Delete a category, moving its notes into the default category first.
///
/// The migration and the delete are two separate store calls; the delete
/// only removes notes that were added to the category in between.
pub async fn delete_category(store: &NoteStore, category: &str) -> Result<CategoryDeletion> {
    ensure_not_default(category)?;

    let plan = plan_category_deletion(store, category).await?;
    let moved = if plan.requires_migration() {
        store
            .update_notes_category(category, DEFAULT_CATEGORY)
            .await?
    } else {
        0
    };
    let removed = store.delete_notes_by_category(category).await?;
    tracing::debug!(category, moved, removed, "Deleted category");

    Ok(CategoryDeletion { moved })
}

/// Move every note in `old_category` to `new_category`.
pub async fn rename_category(
    store: &NoteStore,
    old_category: &str,
    new_category: &str,
) -> Result<usize> {
    let new_category = normalize_category(new_category);
    if old_category == new_category {
        return Ok(0);
    }
    store.update_notes_category(old_category, &new_category).await
}
