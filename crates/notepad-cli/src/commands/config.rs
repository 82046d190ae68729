use notepad_core::models::Settings;
use notepad_core::NoteStore;
use serde::de::DeserializeOwned;

use crate::cli::{ConfigCommands, SettingKey};
use crate::error::CliError;

impl SettingKey {
    pub const fn name(self) -> &'static str {
        match self {
            Self::AutoSave => "auto_save",
            Self::ViewMode => "view_mode",
            Self::Theme => "theme",
            Self::EditorBackground => "editor_background",
        }
    }
}

pub async fn run_config(store: &NoteStore, command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show { json } => {
            let settings = store.load_settings().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                for line in format_settings_lines(&settings)? {
                    println!("{line}");
                }
            }
        }
        ConfigCommands::Set { key, value } => {
            let mut settings = store.load_settings().await?;
            apply_setting(&mut settings, key, &value)?;
            store.save_settings(settings).await?;
            println!("{} = {}", key.name(), value.trim());
        }
    }

    Ok(())
}

pub fn format_settings_lines(settings: &Settings) -> Result<Vec<String>, CliError> {
    let value = serde_json::to_value(settings)?;
    let lines = value
        .as_object()
        .map(|fields| {
            fields
                .iter()
                .map(|(key, value)| match value {
                    serde_json::Value::String(text) => format!("{key} = {text}"),
                    other => format!("{key} = {other}"),
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(lines)
}

pub fn apply_setting(settings: &mut Settings, key: SettingKey, value: &str) -> Result<(), CliError> {
    match key {
        SettingKey::AutoSave => settings.auto_save = parse_switch(key, value)?,
        SettingKey::ViewMode => settings.view_mode = parse_variant(key, value)?,
        SettingKey::Theme => settings.theme = parse_variant(key, value)?,
        SettingKey::EditorBackground => settings.editor_background = parse_variant(key, value)?,
    }
    Ok(())
}

fn invalid_value(key: SettingKey, value: &str) -> CliError {
    CliError::InvalidSettingValue {
        key: key.name().to_string(),
        value: value.to_string(),
    }
}

fn parse_switch(key: SettingKey, value: &str) -> Result<bool, CliError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid_value(key, value)),
    }
}

fn parse_variant<T: DeserializeOwned>(key: SettingKey, value: &str) -> Result<T, CliError> {
    let normalized = value.trim().to_lowercase();
    // "grey" is accepted as an alias for the gray background
    let normalized = if normalized == "grey" {
        "gray".to_string()
    } else {
        normalized
    };
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| invalid_value(key, value))
}
