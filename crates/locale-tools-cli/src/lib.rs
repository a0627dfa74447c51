// crates/locale-tools-cli/src/lib.rs
// ============================================================================
// Module: Locale Tools CLI Library
// Description: Shared helpers for the locale-tools binary.
// Purpose: Expose the operator message catalog and the `t!` macro.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! Library half of the `locale-tools` CLI. It holds the operator message
//! catalog so the binary and its tests render identical text.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;

#[cfg(test)]
#[path = "tests/i18n.rs"]
mod i18n_tests;
