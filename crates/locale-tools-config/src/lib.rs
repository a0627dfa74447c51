// crates/locale-tools-config/src/lib.rs
// ============================================================================
// Module: Locale Tools Config Library
// Description: Optional TOML configuration for the locale tools.
// Purpose: Single source of truth for locale-tools.toml semantics.
// Dependencies: locale-tools-core, serde, toml
// ============================================================================

//! ## Overview
//! `locale-tools-config` defines where the audit and patch commands find
//! their catalogs. Every field has a built-in default, so the tools run with
//! no config file at all.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
