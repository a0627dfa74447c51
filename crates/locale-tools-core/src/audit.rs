// crates/locale-tools-core/src/audit.rs
// ============================================================================
// Module: Translation Auditor
// Description: Compares locale catalogs against the reference catalog.
// Purpose: Surface empty, stale, missing, and untranslated keys per locale.
// Dependencies: serde, crate::catalog
// ============================================================================

//! ## Overview
//! The auditor is read-only. For each locale it reports four key lists:
//! - `empty`: keys whose value is the empty string.
//! - `stale`: keys absent from the reference catalog.
//! - `missing`: reference keys absent from the locale catalog.
//! - `english`: shared keys whose non-empty value equals the reference text.
//!
//! `empty`, `stale`, and `english` follow the locale catalog order; `missing`
//! follows the reference order. Every catalog is loaded before any report is
//! produced, so a broken file never yields a partial audit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::catalog::CatalogError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit findings for a single locale file.
///
/// # Invariants
/// - Each list holds keys, never values.
/// - A key appears at most once per list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Locale file name as configured (for example `de.json`).
    pub file: String,
    /// Keys with an empty value.
    pub empty: Vec<String>,
    /// Keys not present in the reference catalog.
    pub stale: Vec<String>,
    /// Reference keys not present in the locale catalog.
    pub missing: Vec<String>,
    /// Keys whose value is still the reference text.
    pub english: Vec<String>,
}

impl AuditReport {
    /// Returns true when the report lists no keys at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    /// Returns the total number of listed keys across all four lists.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.empty.len() + self.stale.len() + self.missing.len() + self.english.len()
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audits one locale catalog against the reference catalog.
///
/// # Examples
/// ```
/// use locale_tools_core::Catalog;
/// use locale_tools_core::audit_catalog;
///
/// let reference = Catalog::from_json_str(r#"{"a":"Hello","b":"World"}"#, "en.json")?;
/// let locale = Catalog::from_json_str(r#"{"a":"Hello","c":"X"}"#, "de.json")?;
/// let report = audit_catalog(&reference, &locale, "de.json");
/// assert_eq!(report.stale, vec!["c"]);
/// assert_eq!(report.missing, vec!["b"]);
/// assert_eq!(report.english, vec!["a"]);
/// assert!(report.empty.is_empty());
/// # Ok::<(), locale_tools_core::CatalogError>(())
/// ```
#[must_use]
pub fn audit_catalog(reference: &Catalog, locale: &Catalog, file: &str) -> AuditReport {
    let mut report = AuditReport {
        file: file.to_string(),
        ..AuditReport::default()
    };
    for (key, value) in locale.iter() {
        if value.is_empty() {
            report.empty.push(key.to_string());
        }
        match reference.get(key) {
            None => report.stale.push(key.to_string()),
            Some(source) if !value.is_empty() && value == source => {
                report.english.push(key.to_string());
            }
            Some(_) => {}
        }
    }
    report.missing =
        reference.keys().filter(|key| !locale.contains_key(key)).map(str::to_string).collect();
    report
}

/// Loads the reference and every locale file under `dir`, then audits each.
///
/// Reports are returned in `locale_files` order.
///
/// # Errors
/// Returns [`CatalogError`] for the first file that cannot be loaded.
pub fn audit_directory<S: AsRef<str>>(
    dir: &Path,
    reference_file: &str,
    locale_files: &[S],
) -> Result<Vec<AuditReport>, CatalogError> {
    let reference = Catalog::load(&dir.join(reference_file))?;
    let locales = locale_files
        .iter()
        .map(|file| {
            let file = file.as_ref();
            Catalog::load(&dir.join(file)).map(|catalog| (file, catalog))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(locales.iter().map(|(file, catalog)| audit_catalog(&reference, catalog, file)).collect())
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a key list in bracketed, quoted list form (`['a', 'b']`).
///
/// Keys are single-quoted unless they contain a single quote and no double
/// quote. Backslashes and the active quote are escaped, as are characters
/// that are not printable (controls, non-space separators, format and
/// private-use characters), using `\xNN`, `\uNNNN`, or `\UNNNNNNNN`.
#[must_use]
pub fn render_key_list<S: AsRef<str>>(keys: &[S]) -> String {
    let mut out = String::from("[");
    for (position, key) in keys.iter().enumerate() {
        if position > 0 {
            out.push_str(", ");
        }
        push_quoted(&mut out, key.as_ref());
    }
    out.push(']');
    out
}

/// Appends `key` as a quoted literal.
fn push_quoted(out: &mut String, key: &str) {
    let quote = if key.contains('\'') && !key.contains('"') { '"' } else { '\'' };
    out.push(quote);
    for ch in key.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch == quote => {
                out.push('\\');
                out.push(ch);
            }
            ch if !is_printable(ch) => {
                let code = u32::from(ch);
                let escaped = if code < 0x100 {
                    format!("\\x{code:02x}")
                } else if code < 0x1_0000 {
                    format!("\\u{code:04x}")
                } else {
                    format!("\\U{code:08x}")
                };
                out.push_str(&escaped);
            }
            ch => out.push(ch),
        }
    }
    out.push(quote);
}

/// Returns false for characters rendered as escapes rather than literally.
///
/// Covers control characters, separators other than the ASCII space, format
/// characters, noncharacters, and private-use code points.
fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    if ch.is_control() || ch.is_whitespace() {
        return false;
    }
    !matches!(
        u32::from(ch),
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x206F
            | 0xE000..=0xF8FF
            | 0xFDD0..=0xFDEF
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0xFFFE..=0xFFFF
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
            | 0xF0000..=0x10FFFF
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
