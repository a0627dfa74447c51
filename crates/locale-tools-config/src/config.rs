// crates/locale-tools-config/src/config.rs
// ============================================================================
// Module: Locale Tools Configuration
// Description: Configuration loading and validation for the locale tools.
// Purpose: Provide strict, fail-closed config parsing with built-in defaults.
// Dependencies: locale-tools-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is optional. Without a config file the tools use the
//! built-in reference (`en.json`) and locale list in the current directory.
//! A config file, when present, is loaded with strict size and path limits
//! and validated before use.
//!
//! Resolution order: explicit path, then `LOCALE_TOOLS_CONFIG`, then
//! `locale-tools.toml` in the working directory, then built-in defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use locale_tools_core::REFERENCE_FILE_NAME;
use locale_tools_core::default_locale_files;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "locale-tools.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "LOCALE_TOOLS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of configured locale files.
pub(crate) const MAX_LOCALES: usize = 256;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Locale tools configuration.
///
/// # Invariants
/// - After [`LocaleToolsConfig::validate`], `reference` and every entry of
///   `locales` are plain file names and `locales` holds no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleToolsConfig {
    /// Directory holding the reference and locale catalogs.
    #[serde(default = "default_messages_dir")]
    pub messages_dir: PathBuf,
    /// Reference catalog file name.
    #[serde(default = "default_reference")]
    pub reference: String,
    /// Locale catalog file names in processing order.
    #[serde(default = "default_locale_files")]
    pub locales: Vec<String>,
    /// Report update-table keys missing from a locale as warnings.
    #[serde(default = "default_warn_skipped_updates")]
    pub warn_skipped_updates: bool,
    /// Path the configuration was loaded from, if any (not deserialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for LocaleToolsConfig {
    fn default() -> Self {
        Self {
            messages_dir: default_messages_dir(),
            reference: default_reference(),
            locales: default_locale_files(),
            warn_skipped_updates: default_warn_skipped_updates(),
            source: None,
        }
    }
}

impl LocaleToolsConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// Falls back to [`LocaleToolsConfig::default`] when no path is given, the
    /// environment override is unset, and no default config file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_path(path)? {
            Some(resolved) => Self::load_file(&resolved),
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates a specific config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml_str(content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("messages_dir", &self.messages_dir.to_string_lossy())?;
        validate_file_name("reference", &self.reference)?;
        if self.locales.is_empty() {
            return Err(ConfigError::Invalid("locales must be non-empty".to_string()));
        }
        if self.locales.len() > MAX_LOCALES {
            return Err(ConfigError::Invalid(format!("locales exceeds {MAX_LOCALES} entries")));
        }
        let mut seen = BTreeSet::new();
        for locale in &self.locales {
            validate_file_name("locales", locale)?;
            if locale == &self.reference {
                return Err(ConfigError::Invalid(format!(
                    "locales must not include the reference file {locale}"
                )));
            }
            if !seen.insert(locale.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate locale file {locale}")));
            }
        }
        Ok(())
    }

    /// Returns a copy with `messages_dir` replaced when `dir` is set.
    ///
    /// The override is held to the same path checks as a configured
    /// `messages_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `dir` is empty or too long.
    pub fn with_messages_dir(mut self, dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(dir) = dir {
            validate_path_string("messages_dir", &dir.to_string_lossy())?;
            self.messages_dir = dir;
        }
        Ok(self)
    }
}

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default messages directory (the working directory).
fn default_messages_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Default reference catalog name.
fn default_reference() -> String {
    REFERENCE_FILE_NAME.to_string()
}

/// Skipped update keys are reported unless disabled.
const fn default_warn_skipped_updates() -> bool {
    true
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI, environment, or the default file.
///
/// Returns `None` when nothing is configured and the default file is absent.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default_path = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default_path.is_file().then_some(default_path))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a catalog file name: non-empty, single component, no separators.
fn validate_file_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} entries must be non-empty")));
    }
    if value.len() > MAX_PATH_COMPONENT_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} entry {value} is too long")));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Invalid(format!("{field} entry {value} must be a plain file name")));
    }
    Ok(())
}
