use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "notepad")]
#[command(about = "Take, organize and find notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Quick capture: notepad "note title"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        title: Vec<String>,
        /// Note body (read from stdin when piped and omitted)
        #[arg(short, long)]
        content: Option<String>,
        /// Category (defaults to the default category)
        #[arg(long)]
        category: Option<String>,
        /// Palette name, #RRGGBB or #AARRGGBB
        #[arg(long)]
        color: Option<String>,
        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Pin the note
        #[arg(long)]
        pin: bool,
        /// Reminder time: RFC 3339, "YYYY-MM-DD HH:MM" or +30m/+2h/+1d
        #[arg(long, value_name = "TIME")]
        remind_at: Option<String>,
    },
    /// Create a timestamped quick note
    Quick,
    /// List notes
    List {
        /// Only notes in this category
        #[arg(long)]
        category: Option<String>,
        /// Only notes with this color
        #[arg(long)]
        color: Option<String>,
        /// Sort order
        #[arg(long, value_enum, default_value_t = SortArg::Date)]
        sort: SortArg,
        /// Maximum number of notes to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single note
    Show {
        /// Note ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search note titles and content
    Search {
        /// Text to look for (case-insensitive)
        pattern: String,
        /// Maximum number of notes to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing note
    ///
    /// Without field flags the content is opened in $VISUAL/$EDITOR.
    Edit {
        /// Note ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<String>,
        /// Replace tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
    /// Pin a note to the top of listings
    Pin {
        /// Note ID
        id: String,
    },
    /// Unpin a note
    Unpin {
        /// Note ID
        id: String,
    },
    /// Print a note as shareable plain text
    Share {
        /// Note ID
        id: String,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// List all tags
    Tags {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List upcoming reminders
    Reminders {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show note statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export notes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Print the note list again whenever it changes (Ctrl-C to stop)
    Watch {
        /// Only notes in this category
        #[arg(long)]
        category: Option<String>,
        /// Only notes matching this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show or change preferences
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortArg {
    Date,
    Title,
    Color,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories with note counts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move every note in a category to another one
    Rename {
        /// Current category
        old: String,
        /// New category
        new: String,
    },
    /// Delete a category, moving its notes to the default category
    Delete {
        /// Category name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print current preferences
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one preference
    Set {
        #[arg(value_enum)]
        key: SettingKey,
        value: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SettingKey {
    AutoSave,
    ViewMode,
    Theme,
    EditorBackground,
}
