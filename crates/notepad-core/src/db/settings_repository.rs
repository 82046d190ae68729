//! Settings repository implementation

use crate::error::{Error, Result};
use crate::models::Settings;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for settings storage operations
pub trait SettingsRepository {
    /// Load settings from the database
    fn load(&self) -> Result<Settings>;

    /// Save settings to the database
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// `SQLite` implementation of `SettingsRepository`
pub struct SqliteSettingsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSettingsRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        // Unknown or malformed values fall back to defaults
        if let Some(value) = self.get_setting("auto_save")? {
            settings.auto_save = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(value) = self.get_setting("view_mode")? {
            settings.view_mode = parse_variant(&value).unwrap_or_default();
        }

        if let Some(value) = self.get_setting("theme")? {
            settings.theme = parse_variant(&value).unwrap_or_default();
        }

        if let Some(value) = self.get_setting("editor_background")? {
            settings.editor_background = parse_variant(&value).unwrap_or_default();
        }

        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let repo = SqliteSettingsRepository::new(&tx);

        repo.set_setting("auto_save", if settings.auto_save { "true" } else { "false" })?;
        repo.set_setting("view_mode", &variant_name(&settings.view_mode)?)?;
        repo.set_setting("theme", &variant_name(&settings.theme)?)?;
        repo.set_setting(
            "editor_background",
            &variant_name(&settings.editor_background)?,
        )?;

        tx.commit()?;
        Ok(())
    }
}

impl SqliteSettingsRepository<'_> {
    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Lowercase serde name of a unit enum variant
fn variant_name<T: Serialize>(value: &T) -> Result<String> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(name) => Ok(name),
        other => Err(Error::InvalidInput(format!(
            "setting is not a unit variant: {other}"
        ))),
    }
}

fn parse_variant<T: DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_ascii_lowercase())).ok()
}
