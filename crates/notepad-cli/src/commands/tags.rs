use notepad_core::NoteStore;

use crate::error::CliError;

pub async fn run_tags(store: &NoteStore, as_json: bool) -> Result<(), CliError> {
    let tags = store.list_tags().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        for tag in tags {
            println!("#{tag}");
        }
    }
    Ok(())
}
