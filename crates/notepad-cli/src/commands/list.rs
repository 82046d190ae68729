use notepad_core::models::{sort_notes, SortOrder};
use notepad_core::{Note, NoteStore};

use crate::cli::SortArg;
use crate::commands::common::{parse_color, print_notes};
use crate::error::CliError;

#[derive(Debug)]
pub struct ListOptions {
    pub category: Option<String>,
    pub color: Option<String>,
    pub sort: SortArg,
    pub limit: Option<usize>,
    pub json: bool,
}

impl From<SortArg> for SortOrder {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Date => Self::Date,
            SortArg::Title => Self::Title,
            SortArg::Color => Self::Color,
        }
    }
}

pub async fn list_notes(store: &NoteStore, options: &ListOptions) -> Result<Vec<Note>, CliError> {
    let color = options.color.as_deref().map(parse_color).transpose()?;

    let mut notes = match (options.category.as_deref(), color) {
        (Some(category), color) => {
            let mut notes = store.list_notes_by_category(category).await?;
            if let Some(color) = color {
                notes.retain(|note| note.color == color);
            }
            notes
        }
        (None, Some(color)) => store.list_notes_by_color(color).await?,
        (None, None) => store.list_notes().await?,
    };

    sort_notes(&mut notes, options.sort.into());
    if let Some(limit) = options.limit {
        notes.truncate(limit);
    }
    Ok(notes)
}

pub async fn run_list(store: &NoteStore, options: ListOptions) -> Result<(), CliError> {
    let notes = list_notes(store, &options).await?;
    print_notes(&notes, options.json)
}
