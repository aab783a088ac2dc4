//! Content entities and their per-locale translations.
//!
//! A content entity is the stable, language-independent unit; a translation is
//! an attached, independently-removable facet. An entity with no translation
//! in the fetched locale is a valid state - the front-ends render an explicit
//! placeholder for it, never blank space.

use serde::{Deserialize, Serialize};

use meridian_core::{ListId, Locale, ParagraphId, SpecGroupId, TableId};

/// A prose block: title, subtitle, body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: ParagraphId,
    pub sort_order: i32,
    /// Translation for the fetched locale, if one exists.
    pub translation: Option<ParagraphTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphTranslation {
    pub locale: Locale,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub full_text: Option<String>,
}

/// A bulleted list of free-text items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    /// Slug from the API, or derived from the wrapper key when absent.
    pub slug: String,
    pub sort_order: i32,
    pub translation: Option<ListTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTranslation {
    pub locale: Locale,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Ordered; duplicates allowed.
    pub items: Vec<String>,
}

/// A group of key/value specifications (e.g. "Compressive strength: 42 MPa").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecGroup {
    pub id: SpecGroupId,
    /// Slug from the API, or derived from the wrapper key when absent.
    pub slug: String,
    pub sort_order: i32,
    pub translation: Option<SpecGroupTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecGroupTranslation {
    pub locale: Locale,
    pub title: Option<String>,
    pub description: Option<String>,
    pub specs: Vec<SpecItem>,
}

/// One specification row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecItem {
    pub key: String,
    pub value: String,
    pub unit: Option<String>,
}

/// A free-form data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub sort_order: i32,
    pub translation: Option<TableTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTranslation {
    pub locale: Locale,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Column headers, in display order.
    pub columns: Vec<String>,
    /// Row-major cells. Rows shorter than the column count render as empty
    /// trailing cells; this is not enforced here.
    pub rows: Vec<Vec<String>>,
    pub notes: Option<String>,
}
