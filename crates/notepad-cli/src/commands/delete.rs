use notepad_core::NoteStore;

use crate::commands::common::parse_note_id;
use crate::error::CliError;

pub async fn run_delete(store: &NoteStore, id: &str) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;

    if !store.delete_note(note_id).await? {
        return Err(CliError::NoteNotFound(note_id.to_string()));
    }
    println!("{note_id}");
    Ok(())
}
