//! User preference model

use serde::{Deserialize, Serialize};

/// Theme mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow system preference
    #[default]
    System,
}

/// Layout of the note list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    /// The other layout
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }
}

/// Background tint of the note editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditorBackground {
    #[default]
    Default,
    /// Eye-protection green
    Green,
    Gray,
    Blue,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Debounced auto-save while editing
    pub auto_save: bool,
    pub view_mode: ViewMode,
    pub theme: ThemeMode,
    pub editor_background: EditorBackground,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save: true,
            view_mode: ViewMode::List,
            theme: ThemeMode::System,
            editor_background: EditorBackground::Default,
        }
    }
}
