use chrono::Local;
use notepad_core::{Note, NoteStore};

use crate::error::CliError;

pub async fn run_quick(store: &NoteStore) -> Result<(), CliError> {
    let id = store.insert_note(Note::quick(Local::now())).await?;
    println!("{id}");
    Ok(())
}
