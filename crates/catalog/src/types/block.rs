//! Layout blocks.
//!
//! A block is an ordered, typed slot in a product's layout. Four block kinds
//! reference editable content entities; everything else is a system block the
//! front-ends render as an inert placeholder card.

use serde::{Deserialize, Serialize};

use meridian_core::{BlockId, ListId, ParagraphId, SpecGroupId, TableId};

/// A single entry in a product layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block ID, also the deterministic tie-break within a layout.
    pub id: BlockId,
    /// Primary sort key. Ties are broken by `id`.
    pub sort_order: i32,
    /// What the block renders.
    pub content: BlockContent,
}

impl Block {
    /// The `(sort_order, id)` pair that defines the total display order.
    #[must_use]
    pub const fn sort_key(&self) -> (i32, BlockId) {
        (self.sort_order, self.id)
    }

    /// Whether this block's content can be edited in the admin.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        !matches!(self.content, BlockContent::System(_))
    }
}

/// What a block points at.
///
/// The editable kinds carry the id of their content entity; matching on this
/// enum is the single dispatch point for both the viewers and the editors, so
/// adding a kind fails to compile until every renderer handles it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "ref", rename_all = "snake_case")]
pub enum BlockContent {
    /// A `content_paragraph` block.
    Paragraph(ParagraphId),
    /// A `list` block.
    List(ListId),
    /// A `spec_group` block.
    SpecGroup(SpecGroupId),
    /// A `table` block.
    Table(TableId),
    /// Any non-editable block; rendered as an inert placeholder.
    System(SystemBlockKind),
}

impl BlockContent {
    /// The wire name of the block type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Paragraph(_) => "content_paragraph",
            Self::List(_) => "list",
            Self::SpecGroup(_) => "spec_group",
            Self::Table(_) => "table",
            Self::System(kind) => kind.type_name(),
        }
    }
}

/// Non-editable block kinds managed elsewhere in the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemBlockKind {
    Images,
    ImageSet,
    Basic,
    CustomHtml,
    TableGroup,
    SpecsAll,
    /// A block type this front-end does not know about. Kept so the layout
    /// still shows a card in the right position instead of silently dropping
    /// the slot.
    Other(String),
}

impl SystemBlockKind {
    /// Map a wire `block_type` string to a system kind.
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "images" => Self::Images,
            "image_set" => Self::ImageSet,
            "basic" => Self::Basic,
            "custom_html" => Self::CustomHtml,
            "table_group" => Self::TableGroup,
            "specs_all" => Self::SpecsAll,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire name of the block type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Images => "images",
            Self::ImageSet => "image_set",
            Self::Basic => "basic",
            Self::CustomHtml => "custom_html",
            Self::TableGroup => "table_group",
            Self::SpecsAll => "specs_all",
            Self::Other(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_kind_round_trip() {
        for name in [
            "images",
            "image_set",
            "basic",
            "custom_html",
            "table_group",
            "specs_all",
        ] {
            assert_eq!(SystemBlockKind::from_type_name(name).type_name(), name);
        }
    }

    #[test]
    fn test_unknown_type_preserved() {
        let kind = SystemBlockKind::from_type_name("hero_video");
        assert_eq!(kind, SystemBlockKind::Other("hero_video".to_string()));
        assert_eq!(kind.type_name(), "hero_video");
    }

    #[test]
    fn test_editability() {
        let editable = Block {
            id: BlockId::new(1),
            sort_order: 0,
            content: BlockContent::Paragraph(ParagraphId::new(9)),
        };
        let system = Block {
            id: BlockId::new(2),
            sort_order: 1,
            content: BlockContent::System(SystemBlockKind::Images),
        };
        assert!(editable.is_editable());
        assert!(!system.is_editable());
    }
}
