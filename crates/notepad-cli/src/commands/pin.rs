use notepad_core::NoteStore;

use crate::commands::common::parse_note_id;
use crate::error::CliError;

pub async fn run_pin(store: &NoteStore, id: &str, pinned: bool) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;

    if !store.update_pin_status(note_id, pinned).await? {
        return Err(CliError::NoteNotFound(note_id.to_string()));
    }
    println!("{note_id}");
    Ok(())
}
