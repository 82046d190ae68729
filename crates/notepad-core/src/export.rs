//! Note export and share rendering.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::Note;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable note representation used in JSON and Markdown exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNote {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub color: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Convert a note into an export record, keeping tags in stored order.
#[must_use]
pub fn note_to_export_item(note: &Note) -> ExportNote {
    ExportNote {
        id: note.id.get(),
        title: note.title.clone(),
        content: note.content.clone(),
        category: note.category.clone(),
        color: note.color.to_string(),
        tags: note.tags.clone(),
        pinned: note.is_pinned,
        reminder_time: note.reminder_time,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

/// Render notes as pretty-printed JSON.
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    let items = notes
        .iter()
        .map(note_to_export_item)
        .collect::<Vec<ExportNote>>();
    serde_json::to_string_pretty(&items)
}

/// Render notes in Markdown with frontmatter blocks.
///
/// Free-text fields are written as double-quoted scalars so that colons,
/// newlines and `---` inside a title cannot break the frontmatter.
pub fn render_markdown_export(notes: &[Note]) -> serde_json::Result<String> {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let item = note_to_export_item(note);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", item.id);
        let _ = writeln!(output, "title: {}", quoted(&item.title)?);
        let _ = writeln!(output, "category: {}", quoted(&item.category)?);
        let _ = writeln!(output, "color: \"{}\"", item.color);
        let _ = writeln!(output, "pinned: {}", item.pinned);
        if let Some(reminder_time) = item.reminder_time {
            let _ = writeln!(output, "reminder_time: {reminder_time}");
        }
        let _ = writeln!(output, "created_at: {}", item.created_at);
        let _ = writeln!(output, "updated_at: {}", item.updated_at);
        let _ = writeln!(output, "tags:");
        for tag in &item.tags {
            let _ = writeln!(output, "  - {}", quoted(tag)?);
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        output.push_str(&item.content);
        output.push('\n');
    }

    Ok(output)
}

// A JSON string literal is a valid YAML double-quoted scalar
fn quoted(value: &str) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => render_markdown_export(notes),
    }
}

/// Plain-text body handed to the system share sheet.
#[must_use]
pub fn render_share_text(note: &Note) -> String {
    format!("{}\n\n{}", note.title, note.content)
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("notepad-export-{timestamp_ms}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteColor, NoteId};

    fn sample() -> Note {
        Note {
            id: NoteId::new(7),
            title: "Trip".to_string(),
            content: "Pack bags".to_string(),
            category: "Travel".to_string(),
            color: NoteColor::from_argb(0xFF21_96F3),
            tags: vec!["zeta".to_string(), "alpha".to_string()],
            is_pinned: true,
            reminder_time: Some(999),
            created_at: 123,
            updated_at: 456,
            ..Note::default()
        }
    }

    #[test]
    fn note_to_export_item_keeps_tag_order() {
        let export = note_to_export_item(&sample());
        assert_eq!(export.tags, vec!["zeta", "alpha"]);
        assert_eq!(export.color, "#FF2196F3");
    }

    #[test]
    fn render_markdown_export_includes_frontmatter_and_content() {
        let rendered = render_markdown_export(&[sample()]).unwrap();
        assert!(rendered.contains("id: 7"));
        assert!(rendered.contains("title: \"Trip\""));
        assert!(rendered.contains("category: \"Travel\""));
        assert!(rendered.contains("pinned: true"));
        assert!(rendered.contains("reminder_time: 999"));
        assert!(rendered.contains("created_at: 123"));
        assert!(rendered.contains("updated_at: 456"));
        assert!(rendered.contains("tags:\n  - \"zeta\"\n  - \"alpha\""));
        assert!(rendered.ends_with("---\n\nPack bags\n"));
    }

    #[test]
    fn render_markdown_export_quotes_free_text_fields() {
        let note = Note {
            title: "Plan: Q3\n---\nid: 999".to_string(),
            category: "a: b".to_string(),
            tags: vec!["- x".to_string()],
            ..sample()
        };
        let rendered = render_markdown_export(&[note]).unwrap();

        let fences = rendered.lines().filter(|line| *line == "---").count();
        assert_eq!(fences, 2);
        assert!(!rendered.lines().any(|line| line == "id: 999"));
        assert!(rendered.contains(r#"title: "Plan: Q3\n---\nid: 999""#));
        assert!(rendered.contains(r#"category: "a: b""#));
        assert!(rendered.contains(r#"  - "- x""#));
    }

    #[test]
    fn render_json_export_omits_missing_reminder() {
        let note = Note {
            reminder_time: None,
            ..sample()
        };
        let rendered = render_json_export(&[note]).unwrap();
        let parsed: Vec<ExportNote> = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed[0].title, "Trip");
        assert!(!rendered.contains("reminder_time"));
    }

    #[test]
    fn share_text_joins_title_and_content() {
        assert_eq!(render_share_text(&sample()), "Trip\n\nPack bags");
    }

    #[test]
    fn suggested_export_file_name_uses_format_extension() {
        assert_eq!(
            suggested_export_file_name(ExportFormat::Json, 123),
            "notepad-export-123.json"
        );
        assert_eq!(
            suggested_export_file_name(ExportFormat::Markdown, 456),
            "notepad-export-456.md"
        );
    }
}
