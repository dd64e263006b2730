//! Configuration file persistence for highlight-card
//!
//! This module handles loading and saving configuration files to
//! platform-specific directories with robust error handling and
//! graceful fallback to defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
pub const APP_NAME: &str = "highlight-card";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Extension of the temporary file used during atomic writes
const BACKUP_EXTENSION: &str = "json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\highlight-card\`
/// - **macOS**: `~/Library/Application Support/highlight-card/`
/// - **Linux**: `~/.config/highlight-card/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// # Behavior
///
/// 1. If the config file exists and is valid JSON, load and sanitize it
/// 2. If the config file doesn't exist, return default settings
/// 3. If the config file is corrupted/invalid, log a warning and return defaults
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load and sanitize configuration from an explicit path.
///
/// A missing or empty file yields defaults; unreadable or invalid files are errors.
pub fn load_config_from(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to(settings, &get_config_file_path()?)
}

/// Save configuration to an explicit path.
///
/// The JSON is written to a sibling backup file first, which then replaces
/// the original, so a crash never leaves a half-written config behind.
pub fn save_config_to(settings: &Settings, config_path: &Path) -> Result<()> {
    if let Some(dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            debug!("Creating config directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| Error::ConfigSave {
                path: dir.to_path_buf(),
                source: Box::new(e),
            })?;
        }
    }

    let backup_path = config_path.with_extension(BACKUP_EXTENSION);

    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, config_path).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontFamily, Preset, StyleParams};
    use tempfile::TempDir;

    /// Helper to create a test environment with a temporary config directory.
    struct TestEnv {
        _temp_dir: TempDir,
        config_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_file = temp_dir.path().join(APP_NAME).join(CONFIG_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            fs::create_dir_all(self.config_file.parent().unwrap()).unwrap();
            fs::write(&self.config_file, content).expect("Failed to write config");
        }

        fn read_config(&self) -> String {
            fs::read_to_string(&self.config_file).expect("Failed to read config")
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Platform directory tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_get_config_file_path() {
        if let Ok(path) = get_config_file_path() {
            assert!(path.to_string_lossy().contains(APP_NAME));
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let env = TestEnv::new();
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let env = TestEnv::new();
        env.write_config("   \n");
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_config() {
        let env = TestEnv::new();
        env.write_config(r#"{"style": {"font_family": "Lato"}, "history_limit": 20}"#);

        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings.style.font_family, FontFamily::Lato);
        assert_eq!(settings.history_limit, 20);
        assert_eq!(settings.style.font_size, 16);
    }

    #[test]
    fn test_load_corrupted_config_returns_error() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");

        let err = load_config_from(&env.config_file).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_config_sanitizes_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"style": {"padding": 2, "line_height": 9.0}}"#);

        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings.style.padding, StyleParams::MIN_PADDING);
        assert_eq!(settings.style.line_height, StyleParams::MAX_LINE_HEIGHT);
    }

    #[test]
    fn test_config_with_unknown_fields_ignored() {
        let env = TestEnv::new();
        env.write_config(r#"{"history_limit": 7, "future_feature": true}"#);

        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings.history_limit, 7);
    }

    #[test]
    fn test_config_with_wrong_types() {
        let env = TestEnv::new();
        env.write_config(r#"{"history_limit": "lots"}"#);
        assert!(load_config_from(&env.config_file).is_err());
    }

    #[test]
    fn test_config_with_unknown_font_rejected() {
        let env = TestEnv::new();
        env.write_config(r#"{"style": {"font_family": "Comic Sans"}}"#);

        let err = load_config_from(&env.config_file).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Save tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_save_creates_directory_and_valid_json() {
        let env = TestEnv::new();
        let settings = Settings {
            preset: Some(Preset::InstagramStory),
            ..Settings::default()
        };

        save_config_to(&settings, &env.config_file).unwrap();

        let loaded: Settings = serde_json::from_str(&env.read_config()).unwrap();
        assert_eq!(loaded.preset, Some(Preset::InstagramStory));
        assert!(!env.config_file.with_extension(BACKUP_EXTENSION).exists());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let env = TestEnv::new();
        let mut original = Settings {
            history_limit: 12,
            debounce_ms: 250,
            ..Settings::default()
        };
        original.style.highlight_color = "#bbf7d0".to_string();
        original.style.markdown = false;

        save_config_to(&original, &env.config_file).unwrap();
        let loaded = load_config_from(&env.config_file).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let env = TestEnv::new();
        env.write_config(r#"{"history_limit": 3}"#);

        save_config_to(&Settings::default(), &env.config_file).unwrap();
        let loaded = load_config_from(&env.config_file).unwrap();
        assert_eq!(loaded.history_limit, 50);
    }

    #[test]
    fn test_config_file_name_constant() {
        assert_eq!(CONFIG_FILE_NAME, "config.json");
        assert_eq!(APP_NAME, "highlight-card");
    }
}
