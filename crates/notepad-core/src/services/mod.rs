//! Async services shared by every front-end.

pub mod categories;
mod live;
mod note_store;

pub use categories::{
    delete_category, plan_category_deletion, rename_category, CategoryDeletion,
    CategoryDeletionPlan,
};
pub use live::LiveQuery;
pub use note_store::NoteStore;
