use std::env;
use std::ffi::OsString;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};
use notepad_core::{Note, NoteColor, NoteId, NoteStore};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub category: String,
    pub color: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub reminder_time: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
}

pub async fn open_database(path: &Path) -> Result<NoteStore, CliError> {
    Ok(NoteStore::open(path).await?)
}

pub async fn find_note(store: &NoteStore, id: &str) -> Result<Note, CliError> {
    let note_id = parse_note_id(id)?;
    store
        .get_note(note_id)
        .await?
        .ok_or_else(|| CliError::NoteNotFound(note_id.to_string()))
}

pub fn print_notes(notes: &[Note], as_json: bool) -> Result<(), CliError> {
    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_note_lines(notes) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let pin = if note.is_pinned { '*' } else { ' ' };
            let preview = note_preview(note, 32);
            let relative_time = format_relative_time(note.updated_at, now_ms);
            let tags = render_tags(note);

            let line = format!(
                "{:>5} {pin} {preview:<32}  {:<10}  {relative_time:<8}",
                note.id.get(),
                note.category
            );
            if tags.is_empty() {
                line.trim_end().to_string()
            } else {
                format!("{line}  {tags}")
            }
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();

    NoteListItem {
        id: note.id.get(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        category: note.category.clone(),
        color: color_label(note.color),
        tags: note.tags.clone(),
        pinned: note.is_pinned,
        reminder_time: note.reminder_time,
        created_at: note.created_at,
        updated_at: note.updated_at,
        relative_time: format_relative_time(note.updated_at, now_ms),
    }
}

/// Title (or first content line) collapsed to one line.
pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let source = note.title_preview(usize::MAX);
    let collapsed = source.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn render_tags(note: &Note) -> String {
    note.tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

/// Palette name when the color has one, hex otherwise.
pub fn color_label(color: NoteColor) -> String {
    color
        .name()
        .map_or_else(|| color.to_string(), str::to_string)
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| {
            date_time
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        },
    )
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn resolve_note_title(title_parts: &[String]) -> Result<String, CliError> {
    normalize_content(&title_parts.join(" ")).ok_or(CliError::EmptyTitle)
}

/// Explicit content, else piped stdin, else empty.
pub fn resolve_note_content(content: Option<&str>) -> Result<String, CliError> {
    if let Some(content) = content {
        return Ok(normalize_content(content).unwrap_or_default());
    }
    Ok(read_piped_stdin()?.unwrap_or_default())
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn parse_note_id(id: &str) -> Result<NoteId, CliError> {
    let normalized = normalize_note_identifier(id)?;
    normalized
        .parse::<NoteId>()
        .ok()
        .filter(|note_id| note_id.is_persisted())
        .ok_or(CliError::InvalidNoteId(normalized))
}

pub fn parse_color(color: &str) -> Result<NoteColor, CliError> {
    Ok(color.parse::<NoteColor>()?)
}

/// Parse `+30m`/`+2h`/`+1d`, RFC 3339 or local `YYYY-MM-DD HH:MM` into Unix ms.
pub fn parse_reminder_time(input: &str, now: DateTime<Local>) -> Result<i64, CliError> {
    let raw = input.trim();
    let invalid = || CliError::InvalidReminder(raw.to_string());

    if let Some(offset) = raw.strip_prefix('+') {
        let unit = offset.chars().last().ok_or_else(invalid)?;
        let amount = offset[..offset.len() - unit.len_utf8()]
            .parse::<i64>()
            .ok()
            .filter(|amount| *amount > 0)
            .ok_or_else(invalid)?;
        let delta = match unit {
            'm' => TimeDelta::try_minutes(amount),
            'h' => TimeDelta::try_hours(amount),
            'd' => TimeDelta::try_days(amount),
            _ => None,
        }
        .ok_or_else(invalid)?;
        return now
            .checked_add_signed(delta)
            .map(|at| at.timestamp_millis())
            .ok_or_else(invalid);
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.timestamp_millis());
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|at| at.timestamp_millis())
        .ok_or_else(invalid)
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // EDITOR may carry arguments, e.g. "code --wait"
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor())
}

pub fn default_editor() -> String {
    if cfg!(windows) {
        system_notepad(env::var_os("SystemRoot"))
            .display()
            .to_string()
    } else {
        "vi".to_string()
    }
}

/// Absolute path to the Windows Notepad.
///
/// A bare `notepad` resolves to this binary first, because Windows searches
/// the calling executable's directory before `PATH`.
pub fn system_notepad(system_root: Option<OsString>) -> PathBuf {
    system_root
        .map_or_else(|| PathBuf::from(r"C:\Windows"), PathBuf::from)
        .join("System32")
        .join("notepad.exe")
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("notepad-note-{}-{now}.md", std::process::id()))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("NOTEPAD_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(env::temp_dir)
        .join("notepad")
        .join("notepad.db")
}
