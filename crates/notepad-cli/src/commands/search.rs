use notepad_core::NoteStore;

use crate::commands::common::{normalize_search_query, print_notes};
use crate::error::CliError;

pub async fn run_search(
    store: &NoteStore,
    pattern: &str,
    limit: Option<usize>,
    as_json: bool,
) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(pattern)?;
    let mut notes = store.search_notes(&normalized_query).await?;
    if let Some(limit) = limit {
        notes.truncate(limit);
    }

    print_notes(&notes, as_json)
}
