//! Typed documents for a prayer service.
//!
//! Every JSON document is decoded exactly once at this boundary into a
//! strongly-typed tree. The renderer only ever pattern-matches on these
//! types; it never inspects raw JSON.
//!
//! All keys (service, section and subsection keys) pass through
//! [`fold_key`] both when stored and when looked up, so lookups are
//! case-insensitive in every tree.

pub mod highlights;
pub mod schema;
pub mod text;

use std::fmt;

pub use highlights::{HighlightDocument, HighlightNode};
pub use schema::{Schema, SchemaNode, Title};
pub use text::{SubBlock, TextBlock, TextDocument};

/// Normalize a document key for storage and lookup.
pub fn fold_key(key: &str) -> String {
    key.to_lowercase()
}

/// Identifier of a service, e.g. `shacharit`.
///
/// Always trimmed and folded. Used both as a file-name component and as
/// the lookup key into the shared highlight document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Parse a raw identifier (typically the `service` query value).
    ///
    /// Returns `None` for empty values and for values that could leave
    /// the `data/` directory once used as a path component.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = fold_key(raw.trim());
        if key.is_empty() {
            return None;
        }
        if key.contains('/') || key.contains('\\') || key.starts_with('.') {
            log::warn!("Rejected service identifier: {:?}", raw);
            return None;
        }
        Some(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the schema document, relative to the site root.
    pub fn schema_path(&self) -> String {
        format!("data/{}_schema.json", self.0)
    }

    /// Path of the text document, relative to the site root.
    pub fn text_path(&self) -> String {
        format!("data/{}_text.json", self.0)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of the highlight document shared by all services.
pub const HIGHLIGHTS_PATH: &str = "data/highlights.json";

/// Error raised when a document cannot be decoded at all
/// (invalid JSON, or a top-level value of the wrong type).
#[derive(Debug)]
pub struct DecodeError {
    pub document: &'static str,
    pub message: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} document: {}", self.document, self.message)
    }
}
