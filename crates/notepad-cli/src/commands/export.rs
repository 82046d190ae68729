use std::path::Path;

use chrono::Utc;
use notepad_core::export::{
    render_notes_export, suggested_export_file_name, ExportFormat as RenderFormat,
};
use notepad_core::NoteStore;

use crate::cli::ExportFormat;
use crate::error::CliError;

impl From<ExportFormat> for RenderFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

pub async fn run_export(
    store: &NoteStore,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let notes = store.list_notes().await?;
    let rendered = render_notes_export(&notes, format.into())?;

    if let Some(path) = output_path {
        // A directory gets a generated file name
        let path = if path.is_dir() {
            path.join(suggested_export_file_name(
                format.into(),
                Utc::now().timestamp_millis(),
            ))
        } else {
            path.to_path_buf()
        };
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
