// crates/locale-tools-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable i18n helpers.
// Dependencies: locale-tools-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the locale-tools CLI i18n catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - The [`t!`](locale_tools_cli::t) macro formats placeholders correctly.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use locale_tools_cli::i18n::MessageArg;
use locale_tools_cli::i18n::translate;
use locale_tools_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("file", "ja.json");
    assert_eq!(arg.key, "file");
    assert_eq!(arg.value, "ja.json");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let args = vec![MessageArg::new("file", "ko.json"), MessageArg::new("key", "5/hIKX")];
    let result = translate("patch.skipped_key", args);
    assert_eq!(result, "Warning: ko.json has no key '5/hIKX'; update skipped.");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    let result = translate("missing.key", Vec::new());
    assert_eq!(result, "missing.key");
}

/// Confirms the t! macro formats named arguments.
#[test]
fn t_macro_formats_message() {
    let rendered = t!("audit.report.stale", keys = "['c']");
    assert_eq!(rendered, "  Stale keys: ['c']");
}
