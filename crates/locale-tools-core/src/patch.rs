// crates/locale-tools-core/src/patch.rs
// ============================================================================
// Module: Translation Patcher
// Description: Applies update table entries and restores reference key order.
// Purpose: Rewrite locale catalogs deterministically against the reference.
// Dependencies: tempfile, thiserror, crate::catalog, crate::updates
// ============================================================================

//! ## Overview
//! Patching a locale catalog has two steps:
//! 1. Overwrite values for update-table keys that already exist in the
//!    catalog. Keys the catalog lacks are skipped, never inserted.
//! 2. Reorder keys to follow the reference catalog, then append keys the
//!    reference does not know in their original relative order.
//!
//! A [`PatchPlan`] performs both steps for every locale file in memory before
//! anything is written, so a missing or malformed file aborts the run with no
//! writes. Each write is atomic for its own file; there is no cross-file
//! transaction.
//!
//! ## Invariants
//! - Patching is idempotent: a second pass renders identical bytes.
//! - Keys shared with the reference appear in reference order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tempfile::Builder;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::catalog::CatalogError;
use crate::catalog::read_catalog_text;
use crate::updates::UpdateTable;
use crate::updates::UpdateTableError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while planning or writing a patch.
#[derive(Debug, Error)]
pub enum PatchError {
    /// A catalog could not be loaded or rendered.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The update table failed validation.
    #[error("invalid update table: {0}")]
    InvalidTable(#[from] UpdateTableError),
    /// A patched catalog could not be written.
    #[error("failed to write {path}: {error}")]
    Io {
        /// Target path.
        path: String,
        /// Underlying I/O error message.
        error: String,
    },
}

// ============================================================================
// SECTION: Catalog Patching
// ============================================================================

/// Keys touched by [`apply_updates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Keys whose value was overwritten, in table order.
    pub applied: Vec<String>,
    /// Table keys absent from the catalog, in table order.
    pub skipped: Vec<String>,
}

/// Overwrites values for every update key already present in `catalog`.
///
/// Absent keys are recorded in [`UpdateOutcome::skipped`] and left absent.
pub fn apply_updates(catalog: &mut Catalog, updates: &[(&str, &str)]) -> UpdateOutcome {
    let mut outcome = UpdateOutcome::default();
    for (key, replacement) in updates {
        if catalog.replace_existing(key, replacement) {
            outcome.applied.push((*key).to_string());
        } else {
            outcome.skipped.push((*key).to_string());
        }
    }
    outcome
}

/// Returns `catalog` reordered to follow `reference`.
///
/// Reference keys absent from `catalog` are omitted; catalog keys absent from
/// `reference` follow in their original relative order.
///
/// # Examples
/// ```
/// use locale_tools_core::Catalog;
/// use locale_tools_core::reorder_like;
///
/// let reference = Catalog::from_json_str(r#"{"y":"Y","x":"X","z":"Z"}"#, "en.json")?;
/// let locale = Catalog::from_json_str(r#"{"extra":"E","x":"x","y":"y"}"#, "de.json")?;
/// let ordered = reorder_like(&locale, &reference);
/// assert_eq!(ordered.keys().collect::<Vec<_>>(), vec!["y", "x", "extra"]);
/// # Ok::<(), locale_tools_core::CatalogError>(())
/// ```
#[must_use]
pub fn reorder_like(catalog: &Catalog, reference: &Catalog) -> Catalog {
    let mut ordered = Catalog::with_capacity(catalog.len());
    for key in reference.keys() {
        if let Some(value) = catalog.get(key) {
            ordered.insert(key.to_string(), value.to_string());
        }
    }
    for (key, value) in catalog.iter() {
        if !reference.contains_key(key) {
            ordered.insert(key.to_string(), value.to_string());
        }
    }
    ordered
}

/// Applies `updates` to `catalog`, then reorders it like `reference`.
#[must_use]
pub fn patch_catalog(
    mut catalog: Catalog,
    reference: &Catalog,
    updates: &[(&str, &str)],
) -> (Catalog, UpdateOutcome) {
    let outcome = apply_updates(&mut catalog, updates);
    (reorder_like(&catalog, reference), outcome)
}

// ============================================================================
// SECTION: Patch Plan
// ============================================================================

/// One locale file with its patched rendering.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    /// Locale file name as configured.
    pub file: String,
    /// Full path of the locale file.
    pub path: PathBuf,
    /// Patched catalog rendered for disk.
    pub rendered: String,
    /// True when `rendered` differs from the bytes currently on disk.
    pub changed: bool,
    /// Keys applied and skipped for this file.
    pub outcome: UpdateOutcome,
}

impl PlannedFile {
    /// Writes the rendered catalog over the locale file.
    ///
    /// The content goes to a uniquely named sibling temporary file, created
    /// exclusively, and is renamed into place after `sync_all`. Existing
    /// files other than the target are never opened.
    ///
    /// # Errors
    /// Returns [`PatchError::Io`] when the temporary file cannot be created,
    /// written, or renamed.
    pub fn write(&self) -> Result<(), PatchError> {
        let io_error = |err: std::io::Error| PatchError::Io {
            path: self.path.display().to_string(),
            error: err.to_string(),
        };
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut prefix = OsString::from(".");
        if let Some(name) = self.path.file_name() {
            prefix.push(name);
        }
        prefix.push(".");
        let mut temp =
            Builder::new().prefix(&prefix).suffix(".tmp").tempfile_in(parent).map_err(io_error)?;
        temp.write_all(self.rendered.as_bytes()).map_err(io_error)?;
        temp.as_file().sync_all().map_err(io_error)?;
        temp.persist(&self.path).map_err(|err| io_error(err.error))?;
        Ok(())
    }
}

/// Patched renderings for every configured locale file.
///
/// # Invariants
/// - `files` follows the configured locale order.
#[derive(Debug, Clone, Default)]
pub struct PatchPlan {
    /// Planned files in processing order.
    files: Vec<PlannedFile>,
}

impl PatchPlan {
    /// Returns the planned files in processing order.
    #[must_use]
    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    /// Iterates files whose on-disk bytes differ from the patched rendering.
    pub fn drifted(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|file| file.changed)
    }

    /// Writes every planned file in order.
    ///
    /// # Errors
    /// Returns the first [`PatchError`]; files already written stay written.
    pub fn write_all(&self) -> Result<(), PatchError> {
        self.files.iter().try_for_each(PlannedFile::write)
    }
}

/// Loads and patches every locale file under `dir` without writing.
///
/// # Errors
/// Returns [`PatchError`] when the table is invalid or any catalog fails to
/// load or render.
pub fn plan_patch<S: AsRef<str>>(
    dir: &Path,
    reference_file: &str,
    locale_files: &[S],
    table: &UpdateTable<'_>,
) -> Result<PatchPlan, PatchError> {
    table.validate()?;
    let reference = Catalog::load(&dir.join(reference_file))?;
    let mut files = Vec::with_capacity(locale_files.len());
    for file in locale_files {
        let file = file.as_ref();
        let path = dir.join(file);
        let original = read_catalog_text(&path)?;
        let catalog = Catalog::from_json_str(&original, &path.display().to_string())?;
        let (patched, outcome) = patch_catalog(catalog, &reference, table.entries_for_file(file));
        let rendered = patched.to_json_string()?;
        files.push(PlannedFile {
            file: file.to_string(),
            changed: rendered != original,
            path,
            rendered,
            outcome,
        });
    }
    Ok(PatchPlan {
        files,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]
mod tests {
    use super::apply_updates;
    use super::patch_catalog;
    use crate::catalog::Catalog;

    fn catalog(text: &str) -> Catalog {
        Catalog::from_json_str(text, "test").unwrap()
    }

    #[test]
    fn update_overwrites_and_reorders() {
        let reference = catalog(r#"{"y":"Y","x":"X","z":"Z"}"#);
        let locale = catalog(r#"{"x":"old","y":"keep"}"#);
        let (patched, outcome) = patch_catalog(locale, &reference, &[("x", "new")]);
        assert_eq!(patched.iter().collect::<Vec<_>>(), vec![("y", "keep"), ("x", "new")]);
        assert_eq!(outcome.applied, vec!["x"]);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn absent_update_key_is_skipped_not_inserted() {
        let mut locale = catalog(r#"{"a":"1"}"#);
        let outcome = apply_updates(&mut locale, &[("w", "value")]);
        assert_eq!(locale, catalog(r#"{"a":"1"}"#));
        assert_eq!(outcome.skipped, vec!["w"]);
        assert!(outcome.applied.is_empty());
    }

    #[test]
    fn replacement_is_exact_substitution() {
        let mut locale = catalog(r#"{"u9xEkD":"© {year} Rybbit. All rights reserved."}"#);
        let _ = apply_updates(&mut locale, &[("u9xEkD", "© {year} Rybbit. 모든 권리 보유.")]);
        assert_eq!(locale.get("u9xEkD"), Some("© {year} Rybbit. 모든 권리 보유."));
    }

    #[test]
    fn unknown_keys_trail_in_original_order() {
        let reference = catalog(r#"{"a":"A","b":"B"}"#);
        let locale = catalog(r#"{"q":"1","b":"2","p":"3","a":"4"}"#);
        let (patched, _) = patch_catalog(locale, &reference, &[]);
        assert_eq!(patched.keys().collect::<Vec<_>>(), vec!["a", "b", "q", "p"]);
    }
}
