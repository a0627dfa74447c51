// crates/locale-tools-core/src/catalog.rs
// ============================================================================
// Module: Locale Catalog Model
// Description: Ordered string-to-string catalog with strict JSON loading.
// Purpose: Hold reference and locale catalogs with their on-disk key order.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Catalog`] is a flat, ordered mapping from message key to message text,
//! loaded from a single JSON object. Key order follows the document, which is
//! what lets the patcher reproduce the reference ordering on write.
//!
//! ## Invariants
//! - Every value is a JSON string; other value types fail closed.
//! - Keys are unique; a repeated key keeps its first position and last value.
//! - Serialization is two-space indented, unescaped UTF-8, newline-terminated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde::Serializer;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum catalog file size accepted by [`Catalog::load`].
pub const MAX_CATALOG_BYTES: u64 = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or rendering a catalog.
///
/// # Invariants
/// - `origin` names the file (or label) the catalog came from.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read {origin}: {error}")]
    Io {
        /// Catalog origin.
        origin: String,
        /// Underlying I/O error message.
        error: String,
    },
    /// The catalog file exceeds [`MAX_CATALOG_BYTES`].
    #[error("{origin} exceeds size limit ({size} > {limit} bytes)")]
    TooLarge {
        /// Catalog origin.
        origin: String,
        /// Observed size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
    /// The catalog file is not valid UTF-8.
    #[error("{origin} is not valid utf-8")]
    NotUtf8 {
        /// Catalog origin.
        origin: String,
    },
    /// The catalog text is not valid JSON.
    #[error("failed to parse {origin}: {error}")]
    Parse {
        /// Catalog origin.
        origin: String,
        /// Parser error message.
        error: String,
    },
    /// The top-level JSON value is not an object.
    #[error("{origin} must contain a JSON object, found {found}")]
    NotAnObject {
        /// Catalog origin.
        origin: String,
        /// JSON kind found at the top level.
        found: &'static str,
    },
    /// A catalog value is not a JSON string.
    #[error("{origin}: value for key '{key}' must be a string, found {found}")]
    NonStringValue {
        /// Catalog origin.
        origin: String,
        /// Offending key.
        key: String,
        /// JSON kind found for the key.
        found: &'static str,
    },
    /// The catalog could not be rendered as JSON.
    #[error("failed to render {origin}: {error}")]
    Render {
        /// Catalog origin.
        origin: String,
        /// Serializer error message.
        error: String,
    },
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Ordered string-to-string message catalog.
///
/// # Invariants
/// - `index[key]` is the position of `key` in `entries`.
/// - Iteration order is insertion order.
///
/// # Examples
/// ```
/// use locale_tools_core::Catalog;
///
/// let catalog = Catalog::from_json_str(r#"{"b":"Bonjour","a":""}"#, "fr.json")?;
/// assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["b", "a"]);
/// assert_eq!(catalog.get("b"), Some("Bonjour"));
/// # Ok::<(), locale_tools_core::CatalogError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Entries in document order.
    entries: Vec<(String, String)>,
    /// Key to entry position lookup.
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Loads a catalog file from disk.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the file cannot be read, exceeds
    /// [`MAX_CATALOG_BYTES`], is not UTF-8, or is not a flat string object.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = read_catalog_text(path)?;
        Self::from_json_str(&text, &path.display().to_string())
    }

    /// Parses a catalog from JSON text. `origin` labels errors.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the text is not a JSON object whose
    /// values are all strings.
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(text).map_err(|err| CatalogError::Parse {
            origin: origin.to_string(),
            error: err.to_string(),
        })?;
        Self::from_json_value(value, origin)
    }

    /// Parses a catalog from JSON bytes. `origin` labels errors.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the bytes are not UTF-8 or do not hold a
    /// flat string object.
    pub fn from_json_slice(bytes: &[u8], origin: &str) -> Result<Self, CatalogError> {
        let text = std::str::from_utf8(bytes).map_err(|_| CatalogError::NotUtf8 {
            origin: origin.to_string(),
        })?;
        Self::from_json_str(text, origin)
    }

    /// Converts a parsed JSON value into a catalog.
    fn from_json_value(value: Value, origin: &str) -> Result<Self, CatalogError> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(CatalogError::NotAnObject {
                    origin: origin.to_string(),
                    found: json_kind(&other),
                });
            }
        };
        let mut catalog = Self::with_capacity(map.len());
        for (key, value) in map {
            match value {
                Value::String(text) => {
                    catalog.insert(key, text);
                }
                other => {
                    return Err(CatalogError::NonStringValue {
                        origin: origin.to_string(),
                        key,
                        found: json_kind(&other),
                    });
                }
            }
        }
        Ok(catalog)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|position| self.entries[*position].1.as_str())
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Inserts or replaces an entry, returning the previous value.
    ///
    /// New keys are appended; existing keys keep their position.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        if let Some(position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[*position].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Replaces the value of an existing key. Returns false when `key` is absent.
    pub fn replace_existing(&mut self, key: &str, value: &str) -> bool {
        let Some(position) = self.index.get(key) else {
            return false;
        };
        let slot = &mut self.entries[*position].1;
        value.clone_into(slot);
        true
    }

    /// Renders the catalog as pretty JSON with a trailing newline.
    ///
    /// Output uses two-space indentation and writes non-ASCII text literally.
    ///
    /// # Errors
    /// Returns [`CatalogError::Render`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let mut rendered =
            serde_json::to_string_pretty(self).map_err(|err| CatalogError::Render {
                origin: "catalog".to_string(),
                error: err.to_string(),
            })?;
        rendered.push('\n');
        Ok(rendered)
    }
}

impl Serialize for Catalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (key, value) in iter {
            catalog.insert(key, value);
        }
        catalog
    }
}

// ============================================================================
// SECTION: File Input
// ============================================================================

/// Reads catalog text with size and encoding limits.
///
/// # Errors
/// Returns [`CatalogError`] when the file cannot be opened or read, exceeds
/// [`MAX_CATALOG_BYTES`], or is not UTF-8.
pub fn read_catalog_text(path: &Path) -> Result<String, CatalogError> {
    let origin = path.display().to_string();
    let io_error = |err: std::io::Error| CatalogError::Io {
        origin: origin.clone(),
        error: err.to_string(),
    };
    let file = fs::File::open(path).map_err(io_error)?;
    let metadata = file.metadata().map_err(io_error)?;
    if metadata.len() > MAX_CATALOG_BYTES {
        return Err(CatalogError::TooLarge {
            origin,
            size: metadata.len(),
            limit: MAX_CATALOG_BYTES,
        });
    }
    let mut bytes = Vec::new();
    file.take(MAX_CATALOG_BYTES + 1).read_to_end(&mut bytes).map_err(io_error)?;
    let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    if size > MAX_CATALOG_BYTES {
        return Err(CatalogError::TooLarge {
            origin,
            size,
            limit: MAX_CATALOG_BYTES,
        });
    }
    String::from_utf8(bytes).map_err(|_| CatalogError::NotUtf8 {
        origin,
    })
}

/// Names the JSON kind of `value` for error messages.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions are permitted."
)]
mod tests {
    use super::Catalog;
    use super::CatalogError;

    #[test]
    fn parse_preserves_document_order() {
        let catalog = Catalog::from_json_str(r#"{"z":"1","a":"2","m":"3"}"#, "t").unwrap();
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let catalog = Catalog::from_json_str(r#"{"a":"1","b":"2","a":"3"}"#, "t").unwrap();
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(catalog.get("a"), Some("3"));
    }

    #[test]
    fn non_string_value_is_rejected() {
        let err = Catalog::from_json_str(r#"{"a":"ok","b":7}"#, "de.json").unwrap_err();
        match err {
            CatalogError::NonStringValue {
                origin,
                key,
                found,
            } => {
                assert_eq!(origin, "de.json");
                assert_eq!(key, "b");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_object_is_rejected() {
        let err = Catalog::from_json_str(r#"{"a":{"b":"c"}}"#, "t").unwrap_err();
        assert!(matches!(err, CatalogError::NonStringValue { found: "object", .. }));
    }

    #[test]
    fn top_level_array_is_rejected() {
        let err = Catalog::from_json_str(r#"["a"]"#, "t").unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject { found: "array", .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = Catalog::from_json_str(r#"{"a":"#, "t").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn invalid_utf8_slice_is_rejected() {
        let err = Catalog::from_json_slice(&[0xFF, 0xFE], "t").unwrap_err();
        assert!(matches!(err, CatalogError::NotUtf8 { .. }));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut catalog: Catalog =
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
                .into_iter()
                .collect();
        assert_eq!(catalog.insert("a".to_string(), "9".to_string()), Some("1".to_string()));
        assert_eq!(catalog.insert("c".to_string(), "3".to_string()), None);
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec![("a", "9"), ("b", "2"), ("c", "3")]);
    }

    #[test]
    fn replace_existing_ignores_absent_keys() {
        let mut catalog = Catalog::from_json_str(r#"{"a":"1"}"#, "t").unwrap();
        assert!(catalog.replace_existing("a", "2"));
        assert!(!catalog.replace_existing("w", "value"));
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains_key("w"));
    }

    #[test]
    fn render_uses_two_space_indent_and_literal_unicode() {
        let catalog =
            Catalog::from_json_str(r#"{"rd5F5r":"自定义计划","u9xEkD":"© {year} Rybbit."}"#, "t")
                .unwrap();
        let rendered = catalog.to_json_string().unwrap();
        assert_eq!(rendered, "{\n  \"rd5F5r\": \"自定义计划\",\n  \"u9xEkD\": \"© {year} Rybbit.\"\n}\n");
    }

    #[test]
    fn render_escapes_quotes_and_control_characters() {
        let catalog = Catalog::from_json_str(r#"{"k":"a \"b\"\nc"}"#, "t").unwrap();
        let rendered = catalog.to_json_string().unwrap();
        assert_eq!(rendered, "{\n  \"k\": \"a \\\"b\\\"\\nc\"\n}\n");
    }

    #[test]
    fn empty_catalog_renders_as_empty_object() {
        assert_eq!(Catalog::new().to_json_string().unwrap(), "{}\n");
    }
}
