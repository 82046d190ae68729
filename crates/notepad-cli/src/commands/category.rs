use notepad_core::models::DEFAULT_CATEGORY;
use notepad_core::services::{delete_category, rename_category};
use notepad_core::NoteStore;
use serde::Serialize;

use crate::cli::CategoryCommands;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct CategoryItem {
    pub name: String,
    pub notes: usize,
}

pub async fn run_category(store: &NoteStore, command: CategoryCommands) -> Result<(), CliError> {
    match command {
        CategoryCommands::List { json } => {
            let items = store
                .category_counts()
                .await?
                .into_iter()
                .map(|(name, notes)| CategoryItem { name, notes })
                .collect::<Vec<_>>();

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in items {
                    println!("{:<20}  {}", item.name, item.notes);
                }
            }
        }
        CategoryCommands::Rename { old, new } => {
            let moved = rename_category(store, &old, &new).await?;
            println!("Moved {moved} note(s) from '{old}' to '{}'", new.trim());
        }
        CategoryCommands::Delete { name } => {
            let outcome = delete_category(store, &name).await?;
            if outcome.moved > 0 {
                println!(
                    "Deleted category '{name}'; moved {} note(s) to '{DEFAULT_CATEGORY}'",
                    outcome.moved
                );
            } else {
                println!("Deleted category '{name}'");
            }
        }
    }

    Ok(())
}
