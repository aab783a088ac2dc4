//! The bundle: one product's full content snapshot in one locale.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meridian_core::{
    CategoryId, ImageGroupId, ImageId, LayoutId, ListId, ParagraphId, ProductId, ProductKind,
    ProductStatus, SpecGroupId, TableId,
};

use super::content::{List, Paragraph, SpecGroup, Table};
use super::Block;

/// The normalized client-side snapshot of one product's content in one locale.
///
/// Fetched fresh on navigation, on locale change, and after every successful
/// mutation (reload-after-write); never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub info: BaseInfo,
    pub layout: Layout,
    pub paragraphs: HashMap<ParagraphId, Paragraph>,
    pub lists: HashMap<ListId, List>,
    pub spec_groups: HashMap<SpecGroupId, SpecGroup>,
    pub tables: HashMap<TableId, Table>,
    /// Image groups render as their own non-ordered section, outside the
    /// block layout.
    pub image_groups: Vec<ImageGroup>,
}

impl Bundle {
    /// Resolve an editable block's content entity, if it is present in the
    /// per-type map. A dangling reference is rendered the same way as a
    /// missing translation: an explicit placeholder.
    #[must_use]
    pub fn paragraph(&self, id: ParagraphId) -> Option<&Paragraph> {
        self.paragraphs.get(&id)
    }

    #[must_use]
    pub fn list(&self, id: ListId) -> Option<&List> {
        self.lists.get(&id)
    }

    #[must_use]
    pub fn spec_group(&self, id: SpecGroupId) -> Option<&SpecGroup> {
        self.spec_groups.get(&id)
    }

    #[must_use]
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(&id)
    }
}

/// The untranslatable identity of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseInfo {
    pub id: ProductId,
    /// URL slug, stable across locales.
    pub slug: String,
    /// Optional internal product code.
    pub code: Option<String>,
    pub kind: ProductKind,
    pub status: ProductStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    /// Localized name for the fetched locale, when translated.
    pub name: Option<String>,
    /// Localized description for the fetched locale, when translated.
    pub description: Option<String>,
}

/// The ordered sequence of blocks for a product. Exactly one per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub id: LayoutId,
    pub name: String,
    /// Informational only; the API always returns exactly one layout.
    pub is_default: bool,
    /// Sorted ascending by `(sort_order, id)` by the normalizer.
    pub blocks: Vec<Block>,
}

/// A named bucket of images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGroup {
    pub id: ImageGroupId,
    pub name: String,
    pub sort_order: i32,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub url: String,
    pub alt: Option<String>,
    pub sort_order: i32,
}

/// One row of the product listing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub slug: String,
    /// Localized name, absent when the product has no translation in the
    /// requested locale.
    pub name: Option<String>,
    pub kind: ProductKind,
    pub status: ProductStatus,
}
