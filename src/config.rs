// Settings loading and parsing (config/settings.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::roster::player::TeamTempo;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse settings file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize settings from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// settings.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the settings.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    roster: RosterSection,
    editor: EditorSection,
}

#[derive(Debug, Clone, Deserialize)]
struct RosterSection {
    path: String,
    default_tempo: String,
}

#[derive(Debug, Clone, Deserialize)]
struct EditorSection {
    default_rating: u8,
}

/// Validated settings assembled from settings.toml.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where the roster autoloads from and autosaves to.
    pub roster_path: String,
    /// Tempo used when starting a fresh roster.
    pub default_tempo: TeamTempo,
    /// Rating pre-filled for every attribute of a newly added player.
    pub default_rating: u8,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate settings from `config/settings.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_settings()` which handles default initialization.
pub(crate) fn load_settings_from(base_dir: &Path) -> Result<Settings, ConfigError> {
    let path = base_dir.join("config").join("settings.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let file: SettingsFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let default_tempo =
        TeamTempo::from_keyword(&file.roster.default_tempo).ok_or_else(|| {
            ConfigError::ValidationError {
                field: "roster.default_tempo".into(),
                message: format!(
                    "unknown tempo `{}` (expected very-slow, slow, balanced, fast, very-fast)",
                    file.roster.default_tempo
                ),
            }
        })?;

    if file.editor.default_rating > 99 {
        return Err(ConfigError::ValidationError {
            field: "editor.default_rating".into(),
            message: format!("must be 0-99, got {}", file.editor.default_rating),
        });
    }

    if file.roster.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "roster.path".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(Settings {
        roster_path: file.roster.path,
        default_tempo,
        default_rating: file.editor.default_rating,
    })
}

/// Ensure `config/settings.toml` exists by copying it from `defaults/`
/// when missing. Returns true if a copy was made.
pub fn ensure_settings_file(base_dir: &Path) -> Result<bool, ConfigError> {
    let default_path = base_dir.join("defaults").join("settings.toml");
    let config_dir = base_dir.join("config");
    let target = config_dir.join("settings.toml");

    if target.exists() {
        return Ok(false);
    }
    if !default_path.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor defaults/settings.toml found in {}; \
                 run from the project root or ensure defaults/ is present",
                target.display(),
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&default_path, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy defaults to {}: {e}", target.display()),
    })?;

    Ok(true)
}

/// Convenience wrapper: loads settings relative to the current working
/// directory, copying the default file first if needed.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_settings_file(&cwd)?;
    load_settings_from(&cwd)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
