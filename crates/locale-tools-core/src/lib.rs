// crates/locale-tools-core/src/lib.rs
// ============================================================================
// Module: Locale Tools Core Library
// Description: Catalog model, translation auditor, and translation patcher.
// Purpose: Single source of truth for locale catalog audit and patch semantics.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `locale-tools-core` audits and patches flat JSON locale catalogs against an
//! English reference catalog.
//!
//! - [`audit`] reports empty, stale, missing, and untranslated keys.
//! - [`patch`] applies the built-in [`updates`] table and restores reference
//!   key order before writing each file back.
//! - [`catalog`] holds the ordered, string-only catalog model shared by both.
//!
//! Catalog files are treated as hand-edited input: loading is size limited and
//! fails closed on anything other than a flat object of strings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod catalog;
pub mod patch;
pub mod updates;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditReport;
pub use audit::audit_catalog;
pub use audit::audit_directory;
pub use audit::render_key_list;
pub use catalog::Catalog;
pub use catalog::CatalogError;
pub use catalog::MAX_CATALOG_BYTES;
pub use patch::PatchError;
pub use patch::PatchPlan;
pub use patch::PlannedFile;
pub use patch::UpdateOutcome;
pub use patch::apply_updates;
pub use patch::patch_catalog;
pub use patch::plan_patch;
pub use patch::reorder_like;
pub use updates::LocaleUpdates;
pub use updates::REFERENCE_FILE_NAME;
pub use updates::TARGET_LOCALES;
pub use updates::TargetLocale;
pub use updates::UPDATE_TABLE;
pub use updates::UpdateTable;
pub use updates::UpdateTableError;
pub use updates::default_locale_files;
