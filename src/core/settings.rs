//! # Settings
//!
//! User preferences live in a key/value store outside the viewer core. Values are
//! strings; the viewer only reads them. Two keys are used, both numeric sensitivity
//! multipliers that default to `1` when missing.

use std::{collections::HashMap, fs, path::Path};

use log::warn;
use serde_json::Value;
use thiserror::Error;

/// Multiplier applied to drag-to-rotate gestures.
pub const DRAG_SENSITIVITY_KEY: &str = "click-drag-sensitivity";
/// Multiplier applied to wheel dolly gestures.
pub const WHEEL_SENSITIVITY_KEY: &str = "wheel-sensitivity";
/// Sensitivity used when a setting is missing or unusable.
pub const DEFAULT_SENSITIVITY: f32 = 1.0;

/// Errors raised while loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read
    #[error("unable to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON
    #[error("malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level JSON value is not an object
    #[error("settings file must contain a JSON object")]
    NotAnObject,
}

/// Read access to a string key/value store.
pub trait SettingsStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

/// Settings held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parses a flat JSON object into a store.
    ///
    /// String values are kept as-is and numbers are stored in their textual form; any
    /// other value is skipped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let Value::Object(entries) = serde_json::from_str::<Value>(json)? else {
            return Err(SettingsError::NotAnObject);
        };

        let mut settings = Self::new();
        for (key, value) in entries {
            match value {
                Value::String(text) => settings.set(key, text),
                Value::Number(number) => settings.set(key, number.to_string()),
                other => warn!("Ignoring setting {key} with non-scalar value {other}"),
            }
        }
        Ok(settings)
    }

    /// Reads a flat JSON object from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Reads a sensitivity multiplier.
///
/// # Returns
/// The parsed value, or [`DEFAULT_SENSITIVITY`] if the key is missing, does not parse
/// as a number, or is not finite
pub fn read_sensitivity(settings: &dyn SettingsStore, key: &str) -> f32 {
    let Some(raw) = settings.get(key) else {
        return DEFAULT_SENSITIVITY;
    };
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!("Setting {key} has unusable value {raw:?}, using {DEFAULT_SENSITIVITY}");
            DEFAULT_SENSITIVITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sensitivity_defaults_to_one() {
        let settings = MemorySettings::new();
        assert_eq!(read_sensitivity(&settings, DRAG_SENSITIVITY_KEY), 1.0);
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let mut settings = MemorySettings::new();
        settings.set(DRAG_SENSITIVITY_KEY, "2.5");
        settings.set(WHEEL_SENSITIVITY_KEY, " 0.5 ");

        assert_eq!(read_sensitivity(&settings, DRAG_SENSITIVITY_KEY), 2.5);
        assert_eq!(read_sensitivity(&settings, WHEEL_SENSITIVITY_KEY), 0.5);
    }

    #[test]
    fn unusable_values_fall_back_to_default() {
        let mut settings = MemorySettings::new();
        settings.set(DRAG_SENSITIVITY_KEY, "fast");
        settings.set(WHEEL_SENSITIVITY_KEY, "inf");

        assert_eq!(read_sensitivity(&settings, DRAG_SENSITIVITY_KEY), 1.0);
        assert_eq!(read_sensitivity(&settings, WHEEL_SENSITIVITY_KEY), 1.0);
    }

    #[test]
    fn json_objects_accept_strings_and_numbers() {
        let settings = MemorySettings::from_json_str(
            r#"{ "click-drag-sensitivity": "3", "wheel-sensitivity": 0.25, "theme": ["dark"] }"#,
        )
        .unwrap();

        assert_eq!(read_sensitivity(&settings, DRAG_SENSITIVITY_KEY), 3.0);
        assert_eq!(read_sensitivity(&settings, WHEEL_SENSITIVITY_KEY), 0.25);
        assert!(settings.get("theme").is_none());
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(matches!(
            MemorySettings::from_json_str("[1, 2]"),
            Err(SettingsError::NotAnObject)
        ));
    }
}
