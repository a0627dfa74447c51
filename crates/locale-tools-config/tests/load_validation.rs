//! Config load validation tests for locale-tools-config.
// crates/locale-tools-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards and field validation.
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use locale_tools_config::ConfigError;
use locale_tools_config::LocaleToolsConfig;
use locale_tools_core::default_locale_files;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<LocaleToolsConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(contents: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(contents.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn defaults_match_builtin_locales() -> TestResult {
    let config = LocaleToolsConfig::default();
    if config.reference != "en.json" {
        return Err(format!("unexpected reference {}", config.reference));
    }
    if config.locales != default_locale_files() {
        return Err("default locales must match the built-in list".to_string());
    }
    if config.locales.first().map(String::as_str) != Some("zh.json") {
        return Err("zh.json must be processed first".to_string());
    }
    if config.messages_dir != PathBuf::from(".") || !config.warn_skipped_updates {
        return Err("unexpected defaults".to_string());
    }
    Ok(())
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let file = write_config("")?;
    let config = LocaleToolsConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    let mut expected = LocaleToolsConfig::default();
    expected.source = Some(file.path().to_path_buf());
    if config != expected {
        return Err("empty config must equal defaults".to_string());
    }
    Ok(())
}

#[test]
fn explicit_fields_override_defaults() -> TestResult {
    let file = write_config(
        "messages_dir = \"client/messages\"\nreference = \"base.json\"\nlocales = [\"de.json\", \
         \"fr.json\"]\nwarn_skipped_updates = false\n",
    )?;
    let config = LocaleToolsConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.messages_dir != Path::new("client/messages")
        || config.reference != "base.json"
        || config.locales != ["de.json", "fr.json"]
        || config.warn_skipped_updates
    {
        return Err(format!("unexpected config {config:?}"));
    }
    Ok(())
}

#[test]
fn dir_override_replaces_messages_dir() -> TestResult {
    let config = LocaleToolsConfig::default()
        .with_messages_dir(Some(PathBuf::from("msgs")))
        .map_err(|err| err.to_string())?;
    if config.messages_dir != Path::new("msgs") {
        return Err("messages_dir override not applied".to_string());
    }
    let config = config.with_messages_dir(None).map_err(|err| err.to_string())?;
    if config.messages_dir != Path::new("msgs") {
        return Err("absent override must keep messages_dir".to_string());
    }
    Ok(())
}

#[test]
fn dir_override_is_validated_like_config() -> TestResult {
    assert_invalid(
        LocaleToolsConfig::default().with_messages_dir(Some(PathBuf::from("  "))),
        "messages_dir must be non-empty",
    )?;
    assert_invalid(
        LocaleToolsConfig::default().with_messages_dir(Some(PathBuf::from("a".repeat(300)))),
        "messages_dir path component too long",
    )?;
    assert_invalid(
        LocaleToolsConfig::default().with_messages_dir(Some(PathBuf::from("a/".repeat(2_100)))),
        "messages_dir exceeds max length",
    )
}

#[test]
fn load_rejects_missing_explicit_file() -> TestResult {
    assert_invalid(
        LocaleToolsConfig::load(Some(Path::new("definitely-missing-locale-tools.toml"))),
        "config io error",
    )
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(LocaleToolsConfig::load(Some(Path::new(&long_path))), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    assert_invalid(
        LocaleToolsConfig::load(Some(Path::new(&long_component))),
        "config path component too long",
    )
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'#'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(LocaleToolsConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(LocaleToolsConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    assert_invalid(LocaleToolsConfig::from_toml_str("referense = \"en.json\"\n"), "config parse error")
}

#[test]
fn empty_locale_list_is_rejected() -> TestResult {
    assert_invalid(LocaleToolsConfig::from_toml_str("locales = []\n"), "locales must be non-empty")
}

#[test]
fn duplicate_locales_are_rejected() -> TestResult {
    assert_invalid(
        LocaleToolsConfig::from_toml_str("locales = [\"de.json\", \"de.json\"]\n"),
        "duplicate locale file de.json",
    )
}

#[test]
fn reference_in_locales_is_rejected() -> TestResult {
    assert_invalid(
        LocaleToolsConfig::from_toml_str("locales = [\"en.json\", \"de.json\"]\n"),
        "must not include the reference file",
    )
}

#[test]
fn locale_paths_are_rejected() -> TestResult {
    assert_invalid(
        LocaleToolsConfig::from_toml_str("locales = [\"../de.json\"]\n"),
        "must be a plain file name",
    )?;
    assert_invalid(
        LocaleToolsConfig::from_toml_str("reference = \"sub\\\\en.json\"\n"),
        "must be a plain file name",
    )
}

#[test]
fn empty_messages_dir_is_rejected() -> TestResult {
    assert_invalid(
        LocaleToolsConfig::from_toml_str("messages_dir = \"\"\n"),
        "messages_dir must be non-empty",
    )
}
