//! Note editing with debounced auto-save.

mod autosave;
mod session;

pub use autosave::{AutoSaver, AUTO_SAVE_DELAY};
pub use session::{EditorSession, NoteDraft};
