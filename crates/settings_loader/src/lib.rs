//! # Settings Loader
//!
//! Loads the estimator configuration from `settings.json`: which formula
//! preset to use, optional tariff and emission-factor overrides, and an
//! optional fully custom formula.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/energy.json")?;
//! let config = settings.formula_config();
//!
//! // Fall back to ./settings.json, or to built-in defaults when absent
//! let path = Some(PathBuf::from("custom.json"));
//! let settings = settings_loader::load_settings_with_fallback(path.as_ref())?
//!     .unwrap_or_default();
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::Settings;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from the default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Loads settings from an optional path, returning None if no path is provided
pub fn load_optional_settings(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    match path {
        Some(settings_path) => Ok(Some(load_settings(settings_path)?)),
        None => Ok(None),
    }
}

/// Tries the provided path first, then the default location. Returns None only
/// if no settings file exists anywhere. A file that exists but does not parse
/// is an error.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path).map(Some);
        }
    }

    if default_settings_exist() {
        return load_default_settings().map(Some);
    }
    Ok(None)
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Checks if the default settings file (settings.json) exists
pub fn default_settings_exist() -> bool {
    settings_file_exists(DEFAULT_SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::FormulaPreset;
    use std::env;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("settings_loader_{}_{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_settings_reads_preset_and_overrides() {
        let path = write_temp(
            "flat.json",
            r#"{ "settings_version": 1, "preset": "flat_rate", "rate_per_kwh": 6.5 }"#,
        );

        let settings = load_settings(&path).unwrap();
        let config = settings.formula_config();

        assert_eq!(settings.preset, FormulaPreset::FlatRate);
        assert_eq!(config.rate_per_kwh, 6.5);
        assert_eq!(config.emission_factor, 0.92);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_settings_missing_file_has_context() {
        let err = load_settings("/definitely/not/here/settings.json").unwrap_err();
        assert!(err.to_string().contains("Reading settings file"));
    }

    #[test]
    fn test_load_settings_malformed_json() {
        let path = write_temp("broken.json", "{ not json");

        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("Parsing settings JSON"));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_optional_settings_none() {
        assert!(load_optional_settings(None).unwrap().is_none());
    }

    #[test]
    fn test_fallback_uses_given_path() {
        let path = write_temp("given.json", r#"{ "emission_factor": 0.5 }"#);

        let settings = load_settings_with_fallback(Some(&path)).unwrap().unwrap();
        assert_eq!(settings.emission_factor, Some(0.5));

        fs::remove_file(path).unwrap();
    }
}
