//! Mutation payloads accepted by the catalog API.
//!
//! Create and update share the same per-kind shape; the API decides which
//! translation row to touch from the `locale` field the transport layer wraps
//! around these payloads. Optional fields that the admin left empty are
//! omitted entirely rather than sent as empty strings.

use serde::Serialize;

use meridian_core::{CategoryId, ProductKind, ProductStatus};

/// The four editable content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Paragraph,
    List,
    SpecGroup,
    Table,
}

impl ContentKind {
    /// All editable kinds, in the order the admin offers them.
    pub const ALL: [Self; 4] = [Self::Paragraph, Self::List, Self::SpecGroup, Self::Table];

    /// Stable identifier used in admin URLs and form routing.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::List => "list",
            Self::SpecGroup => "spec-group",
            Self::Table => "table",
        }
    }

    /// The API path segment under `/products/{id}/contents/`.
    #[must_use]
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraphs",
            Self::List => "lists",
            Self::SpecGroup => "spec-groups",
            Self::Table => "tables",
        }
    }

    /// Human label for headings and buttons.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Paragraph => "Paragraph",
            Self::List => "List",
            Self::SpecGroup => "Specification group",
            Self::Table => "Table",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(Self::Paragraph),
            "list" => Ok(Self::List),
            "spec-group" => Ok(Self::SpecGroup),
            "table" => Ok(Self::Table),
            _ => Err(format!("invalid content kind: {s}")),
        }
    }
}

/// A typed mutation body for one of the editable content kinds.
///
/// Serializes untagged: the API sees only the kind-specific fields, the kind
/// itself is carried by the endpoint path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentPayload {
    Paragraph(ParagraphPayload),
    List(ListPayload),
    SpecGroup(SpecGroupPayload),
    Table(TablePayload),
}

impl ContentPayload {
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Paragraph(_) => ContentKind::Paragraph,
            Self::List(_) => ContentKind::List,
            Self::SpecGroup(_) => ContentKind::SpecGroup,
            Self::Table(_) => ContentKind::Table,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParagraphPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecGroupPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub specs: Vec<SpecItemPayload>,
    pub sort_order: i32,
}

/// One spec row as sent to the API. `unit` is omitted when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecItemPayload {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TablePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub sort_order: i32,
}

/// Base-info payload for product create and partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProductKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.as_str().parse::<ContentKind>(), Ok(kind));
        }
        assert!("custom_html".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_empty_optionals_omitted() {
        let payload = ParagraphPayload {
            title: Some("Durability".to_string()),
            subtitle: None,
            full_text: Some("Built to last.".to_string()),
            sort_order: 2,
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Durability",
                "full_text": "Built to last.",
                "sort_order": 2,
            })
        );
    }

    #[test]
    fn test_untagged_payload_has_no_kind_field() {
        let payload = ContentPayload::List(ListPayload {
            title: Some("Applications".to_string()),
            description: None,
            items: vec!["Facades".to_string(), "Load-bearing walls".to_string()],
            sort_order: 1,
        });
        assert_eq!(payload.kind(), ContentKind::List);
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Applications",
                "items": ["Facades", "Load-bearing walls"],
                "sort_order": 1,
            })
        );
    }

    #[test]
    fn test_spec_row_unit_omitted_when_absent() {
        let row = SpecItemPayload {
            key: "Weight".to_string(),
            value: "12".to_string(),
            unit: None,
        };
        let json = serde_json::to_value(&row).expect("serialize");
        assert_eq!(json, serde_json::json!({"key": "Weight", "value": "12"}));
    }
}
