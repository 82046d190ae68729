use notepad_core::export::render_share_text;
use notepad_core::NoteStore;

use crate::commands::common::find_note;
use crate::error::CliError;

pub async fn run_share(store: &NoteStore, id: &str) -> Result<(), CliError> {
    let note = find_note(store, id).await?;
    println!("{}", render_share_text(&note));
    Ok(())
}
