// crates/locale-tools-core/src/updates.rs
// ============================================================================
// Module: Translation Update Table
// Description: Built-in target locales and hand-authored replacement strings.
// Purpose: Keep patch data in a statically checked table keyed by locale.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The update table maps each target locale to the keys the patcher
//! overwrites. Locales are an enum, so a misspelled locale cannot reach the
//! table. [`UpdateTable::validate`] covers what the type system cannot:
//! duplicate keys and malformed `{placeholder}` tokens.
//!
//! ## Invariants
//! - [`TARGET_LOCALES`] order is the default processing order.
//! - Replacement values keep placeholders such as `{year}` verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

// ============================================================================
// SECTION: Target Locales
// ============================================================================

/// Default reference catalog file name.
pub const REFERENCE_FILE_NAME: &str = "en.json";

/// Built-in target locales.
///
/// # Invariants
/// - Each variant maps to exactly one `<code>.json` file name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetLocale {
    /// Chinese.
    Zh,
    /// Japanese.
    Ja,
    /// German.
    De,
    /// Polish.
    Pl,
    /// Portuguese.
    Pt,
    /// Italian.
    It,
    /// French.
    Fr,
    /// Korean.
    Ko,
    /// Spanish.
    Es,
}

/// Built-in target locales in processing order.
pub const TARGET_LOCALES: &[TargetLocale] = &[
    TargetLocale::Zh,
    TargetLocale::Ja,
    TargetLocale::De,
    TargetLocale::Pl,
    TargetLocale::Pt,
    TargetLocale::It,
    TargetLocale::Fr,
    TargetLocale::Ko,
    TargetLocale::Es,
];

impl TargetLocale {
    /// Returns the locale code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::Ja => "ja",
            Self::De => "de",
            Self::Pl => "pl",
            Self::Pt => "pt",
            Self::It => "it",
            Self::Fr => "fr",
            Self::Ko => "ko",
            Self::Es => "es",
        }
    }

    /// Returns the catalog file name for this locale.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Zh => "zh.json",
            Self::Ja => "ja.json",
            Self::De => "de.json",
            Self::Pl => "pl.json",
            Self::Pt => "pt.json",
            Self::It => "it.json",
            Self::Fr => "fr.json",
            Self::Ko => "ko.json",
            Self::Es => "es.json",
        }
    }

    /// Resolves a catalog file name back to its locale.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        TARGET_LOCALES.iter().copied().find(|locale| locale.file_name() == file_name)
    }
}

/// Returns the built-in locale file names in processing order.
#[must_use]
pub fn default_locale_files() -> Vec<String> {
    TARGET_LOCALES.iter().map(|locale| locale.file_name().to_string()).collect()
}

// ============================================================================
// SECTION: Table Data
// ============================================================================

/// Replacement strings for one target locale.
#[derive(Debug, Clone, Copy)]
pub struct LocaleUpdates {
    /// Target locale.
    pub locale: TargetLocale,
    /// `(key, replacement)` pairs applied in order.
    pub entries: &'static [(&'static str, &'static str)],
}

/// Built-in update table.
pub const UPDATE_TABLE: &[LocaleUpdates] = &[
    LocaleUpdates {
        locale: TargetLocale::Zh,
        entries: &[
            ("rd5F5r", "自定义计划"),
            ("5/hIKX", "计划限制"),
            ("BdV5Om", "网站"),
            ("HCYBYT", "团队成员"),
        ],
    },
    LocaleUpdates {
        locale: TargetLocale::Ja,
        entries: &[
            ("rd5F5r", "カスタムプラン"),
            ("5/hIKX", "プランの制限"),
            ("BdV5Om", "ウェブサイト"),
            ("HCYBYT", "チームメンバー"),
            ("u9xEkD", "© {year} Rybbit. 全著作権所有。"),
        ],
    },
    LocaleUpdates {
        locale: TargetLocale::De,
        entries: &[
            ("rd5F5r", "Benutzerdefinierter Plan"),
            ("5/hIKX", "Plan-Limits"),
            ("BdV5Om", "Websites"),
            ("HCYBYT", "Teammitglieder"),
        ],
    },
    LocaleUpdates {
        locale: TargetLocale::Pl,
        entries: &[
            ("rd5F5r", "Plan niestandardowy"),
            ("5/hIKX", "Limity planu"),
            ("BdV5Om", "Strony internetowe"),
            ("HCYBYT", "Członkowie zespołu"),
        ],
    },
    LocaleUpdates {
        locale: TargetLocale::Pt,
        entries: &[
            ("rd5F5r", "Plano personalizado"),
            ("5/hIKX", "Limites do plano"),
            ("BdV5Om", "Sites"),
            ("HCYBYT", "Membros da equipe"),
        ],
    },
    LocaleUpdates {
        locale: TargetLocale::It,
        entries: &[
            ("rd5F5r", "Piano personalizzato"),
            ("5/hIKX", "Limiti del piano"),
            ("BdV5Om", "Siti web"),
            ("HCYBYT", "Membri del team"),
        ],
    },
    LocaleUpdates {
        locale: TargetLocale::Fr,
        entries: &[
            ("rd5F5r", "Plan personnalisé"),
            ("5/hIKX", "Limites du plan"),
            ("BdV5Om", "Sites web"),
            ("HCYBYT", "Membres de l'équipe"),
        ],
    },
    LocaleUpdates {
        locale: TargetLocale::Ko,
        entries: &[
            ("rd5F5r", "맞춤 플랜"),
            ("5/hIKX", "플랜 한도"),
            ("BdV5Om", "웹사이트"),
            ("HCYBYT", "팀 멤버"),
            ("u9xEkD", "© {year} Rybbit. 모든 권리 보유."),
        ],
    },
    LocaleUpdates {
        locale: TargetLocale::Es,
        entries: &[
            ("rd5F5r", "Plan personalizado"),
            ("5/hIKX", "Límites del plan"),
            ("BdV5Om", "Sitios web"),
            ("HCYBYT", "Miembros del equipo"),
        ],
    },
];

// ============================================================================
// SECTION: Table View
// ============================================================================

/// Errors reported by [`UpdateTable::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateTableError {
    /// A locale appears more than once.
    #[error("locale {locale} appears more than once")]
    DuplicateLocale {
        /// Locale code.
        locale: &'static str,
    },
    /// A key appears more than once for one locale.
    #[error("key '{key}' appears more than once for locale {locale}")]
    DuplicateKey {
        /// Locale code.
        locale: &'static str,
        /// Repeated key.
        key: String,
    },
    /// A key is empty.
    #[error("empty key for locale {locale}")]
    EmptyKey {
        /// Locale code.
        locale: &'static str,
    },
    /// A replacement holds a malformed placeholder.
    #[error("replacement for key '{key}' in locale {locale}: {reason}")]
    MalformedPlaceholder {
        /// Locale code.
        locale: &'static str,
        /// Key whose replacement is malformed.
        key: String,
        /// Description of the problem.
        reason: String,
    },
}

/// Borrowed view over an update table.
///
/// # Examples
/// ```
/// use locale_tools_core::UpdateTable;
///
/// let table = UpdateTable::builtin();
/// assert!(table.validate().is_ok());
/// let ja = table.entries_for_file("ja.json");
/// assert!(ja.iter().any(|(key, value)| *key == "u9xEkD" && value.contains("{year}")));
/// assert!(table.entries_for_file("xx.json").is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UpdateTable<'a> {
    /// Table rows.
    rows: &'a [LocaleUpdates],
}

impl<'a> UpdateTable<'a> {
    /// Wraps a table slice.
    #[must_use]
    pub const fn new(rows: &'a [LocaleUpdates]) -> Self {
        Self {
            rows,
        }
    }

    /// Returns the built-in table.
    #[must_use]
    pub const fn builtin() -> UpdateTable<'static> {
        UpdateTable::new(UPDATE_TABLE)
    }

    /// Returns the entries for `locale`, or an empty slice.
    #[must_use]
    pub fn entries_for(&self, locale: TargetLocale) -> &'a [(&'static str, &'static str)] {
        self.rows.iter().find(|row| row.locale == locale).map_or(&[], |row| row.entries)
    }

    /// Returns the entries for a locale file name, or an empty slice.
    ///
    /// File names outside [`TARGET_LOCALES`] have no entries.
    #[must_use]
    pub fn entries_for_file(&self, file_name: &str) -> &'a [(&'static str, &'static str)] {
        TargetLocale::from_file_name(file_name).map_or(&[], |locale| self.entries_for(locale))
    }

    /// Checks for duplicate locales, duplicate or empty keys, and malformed
    /// placeholders.
    ///
    /// # Errors
    /// Returns the first [`UpdateTableError`] found.
    pub fn validate(&self) -> Result<(), UpdateTableError> {
        let mut locales = BTreeSet::new();
        for row in self.rows {
            let locale = row.locale.code();
            if !locales.insert(row.locale) {
                return Err(UpdateTableError::DuplicateLocale {
                    locale,
                });
            }
            let mut keys = BTreeSet::new();
            for (key, replacement) in row.entries {
                if key.is_empty() {
                    return Err(UpdateTableError::EmptyKey {
                        locale,
                    });
                }
                if !keys.insert(*key) {
                    return Err(UpdateTableError::DuplicateKey {
                        locale,
                        key: (*key).to_string(),
                    });
                }
                placeholder_names(replacement).map_err(|reason| {
                    UpdateTableError::MalformedPlaceholder {
                        locale,
                        key: (*key).to_string(),
                        reason,
                    }
                })?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Placeholders
// ============================================================================

/// Extracts `{name}` placeholder names from a message.
///
/// Names must be non-empty and use ASCII letters, digits, or `_`.
///
/// # Errors
/// Returns a description of the first unbalanced or malformed placeholder.
pub fn placeholder_names(text: &str) -> Result<BTreeSet<String>, String> {
    let mut names = BTreeSet::new();
    let mut open: Option<usize> = None;
    for (index, ch) in text.char_indices() {
        match (ch, open) {
            ('{', Some(_)) => return Err(format!("nested '{{' at byte {index}")),
            ('{', None) => open = Some(index),
            ('}', None) => return Err(format!("unmatched '}}' at byte {index}")),
            ('}', Some(start)) => {
                let name = &text[start + 1 .. index];
                if name.is_empty() {
                    return Err(format!("empty placeholder at byte {start}"));
                }
                if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(format!("placeholder '{name}' at byte {start} must use [A-Za-z0-9_]"));
                }
                names.insert(name.to_string());
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        return Err(format!("unclosed '{{' at byte {start}"));
    }
    Ok(names)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
