//! Loosely-typed wire DTOs for catalog API responses.
//!
//! Everything here is `Option` even where the API "always" sends a value; the
//! normalizer in [`crate::convert`] supplies the defaults, so a partial or
//! malformed bundle degrades instead of failing to deserialize.
//!
//! One quirk to be aware of: the list, spec-group, and table collections do
//! not arrive as plain arrays. Each entry is a single-key wrapper object whose
//! key is a composite string like `"list-7"` and whose value is the
//! denormalized payload - an artifact of how the API groups per-type content
//! without a relational join. The wrapper convention is absorbed by the
//! normalizer and never reaches the domain types.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level response of `GET /products/{slug}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBundle {
    pub product: Option<RawBaseInfo>,
    pub layout: Option<RawLayout>,
    #[serde(default)]
    pub paragraphs: Vec<RawParagraph>,
    /// Single-key wrapper objects, key `"list-<id>"`.
    #[serde(default)]
    pub lists: Vec<HashMap<String, RawListEntry>>,
    /// Single-key wrapper objects, key `"spec-<id>"`.
    #[serde(default)]
    pub spec_groups: Vec<HashMap<String, RawSpecGroupEntry>>,
    /// Single-key wrapper objects, key `"table-<id>"`.
    #[serde(default)]
    pub tables: Vec<HashMap<String, RawTableEntry>>,
    #[serde(default)]
    pub image_groups: Vec<RawImageGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBaseInfo {
    pub id: Option<i32>,
    pub slug: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLayout {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub is_default: Option<bool>,
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlock {
    pub id: Option<i32>,
    pub block_type: Option<String>,
    /// Id of the referenced content entity; null for system blocks.
    pub ref_id: Option<i32>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParagraph {
    pub id: Option<i32>,
    pub sort_order: Option<i32>,
    pub translation: Option<RawParagraphTranslation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParagraphTranslation {
    pub locale: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub full_text: Option<String>,
}

/// Denormalized list payload. A non-null `locale` marks that a translation
/// exists for the requested locale; the translated fields sit inline next to
/// the entity fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListEntry {
    pub id: Option<i32>,
    pub slug: Option<String>,
    pub sort_order: Option<i32>,
    pub locale: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpecGroupEntry {
    pub id: Option<i32>,
    pub slug: Option<String>,
    pub sort_order: Option<i32>,
    pub locale: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub specs: Option<Vec<RawSpecItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpecItem {
    pub key: Option<String>,
    pub value: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTableEntry {
    pub id: Option<i32>,
    pub sort_order: Option<i32>,
    pub locale: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub columns: Option<Vec<String>>,
    pub rows: Option<Vec<Vec<String>>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImageGroup {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImage {
    pub id: Option<i32>,
    pub url: Option<String>,
    pub alt: Option<String>,
    pub sort_order: Option<i32>,
}

/// One row of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProductSummary {
    pub id: Option<i32>,
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
}
