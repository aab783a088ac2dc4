//! Editor form drafts: parsing, hydration, and payload assembly.
//!
//! Submitted forms arrive as ordered `(name, value)` pairs so repeated fields
//! (list items, spec rows, table rows) keep their document order. A draft is
//! the raw, untrimmed state - exactly what re-renders into the form when a
//! mutation fails - and `payload()` is the pure cleanup step applied on
//! submit: trim every text field, omit empty optionals, and drop collection
//! entries that are entirely empty after trimming. Partially-filled rows are
//! preserved.

use meridian_catalog::{
    BaseInfo, ContentPayload, ListPayload, ListTranslation, ParagraphPayload,
    ParagraphTranslation, ProductPayload, SpecGroupPayload, SpecGroupTranslation, SpecItemPayload,
    TablePayload, TableTranslation,
};
use meridian_core::{ProductKind, ProductStatus};

/// Separator for table cells within one row input.
const CELL_SEPARATOR: char = '|';

/// First value of a form field, if present.
fn field<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Every value of a repeated form field, in document order.
fn repeated(pairs: &[(String, String)], name: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
        .collect()
}

fn text(pairs: &[(String, String)], name: &str) -> String {
    field(pairs, name).unwrap_or_default().to_string()
}

fn sort_order(pairs: &[(String, String)]) -> i32 {
    field(pairs, "sort_order")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Trim, mapping to `None` when nothing is left.
fn clean(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// The product id every mutation form carries.
pub fn product_id(pairs: &[(String, String)]) -> Option<i32> {
    field(pairs, "product_id").and_then(|v| v.trim().parse().ok())
}

// =============================================================================
// Paragraph
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphDraft {
    pub title: String,
    pub subtitle: String,
    pub full_text: String,
    pub sort_order: i32,
}

impl ParagraphDraft {
    #[must_use]
    pub fn from_form(pairs: &[(String, String)]) -> Self {
        Self {
            title: text(pairs, "title"),
            subtitle: text(pairs, "subtitle"),
            full_text: text(pairs, "full_text"),
            sort_order: sort_order(pairs),
        }
    }

    /// Hydrate from the active locale's translation; empty when none exists
    /// (submitting then creates the translation for this locale).
    #[must_use]
    pub fn from_translation(translation: Option<&ParagraphTranslation>, sort_order: i32) -> Self {
        translation.map_or_else(
            || Self {
                sort_order,
                ..Self::default()
            },
            |t| Self {
                title: t.title.clone().unwrap_or_default(),
                subtitle: t.subtitle.clone().unwrap_or_default(),
                full_text: t.full_text.clone().unwrap_or_default(),
                sort_order,
            },
        )
    }

    #[must_use]
    pub fn payload(&self) -> ContentPayload {
        ContentPayload::Paragraph(ParagraphPayload {
            title: clean(&self.title),
            subtitle: clean(&self.subtitle),
            full_text: clean(&self.full_text),
            sort_order: self.sort_order,
        })
    }
}

// =============================================================================
// List
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDraft {
    pub title: String,
    pub description: String,
    pub items: Vec<String>,
    pub sort_order: i32,
}

impl ListDraft {
    #[must_use]
    pub fn from_form(pairs: &[(String, String)]) -> Self {
        Self {
            title: text(pairs, "title"),
            description: text(pairs, "description"),
            items: repeated(pairs, "items"),
            sort_order: sort_order(pairs),
        }
    }

    #[must_use]
    pub fn from_translation(translation: Option<&ListTranslation>, sort_order: i32) -> Self {
        translation.map_or_else(
            || Self {
                sort_order,
                ..Self::default()
            },
            |t| Self {
                title: t.title.clone().unwrap_or_default(),
                description: t.description.clone().unwrap_or_default(),
                items: t.items.clone(),
                sort_order,
            },
        )
    }

    #[must_use]
    pub fn payload(&self) -> ContentPayload {
        ContentPayload::List(ListPayload {
            title: clean(&self.title),
            description: clean(&self.description),
            items: self.items.iter().filter_map(|item| clean(item)).collect(),
            sort_order: self.sort_order,
        })
    }
}

// =============================================================================
// Spec group
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecRowDraft {
    pub key: String,
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecGroupDraft {
    pub title: String,
    pub description: String,
    pub rows: Vec<SpecRowDraft>,
    pub sort_order: i32,
}

impl SpecGroupDraft {
    /// Spec rows arrive as three parallel repeated fields. Browsers submit
    /// empty inputs too, so the arrays stay index-aligned; a trailing ragged
    /// edge is padded with empty strings.
    #[must_use]
    pub fn from_form(pairs: &[(String, String)]) -> Self {
        let keys = repeated(pairs, "spec_key");
        let values = repeated(pairs, "spec_value");
        let units = repeated(pairs, "spec_unit");
        let len = keys.len().max(values.len()).max(units.len());

        let pick = |list: &[String], i: usize| list.get(i).cloned().unwrap_or_default();
        let rows = (0..len)
            .map(|i| SpecRowDraft {
                key: pick(&keys, i),
                value: pick(&values, i),
                unit: pick(&units, i),
            })
            .collect();

        Self {
            title: text(pairs, "title"),
            description: text(pairs, "description"),
            rows,
            sort_order: sort_order(pairs),
        }
    }

    #[must_use]
    pub fn from_translation(translation: Option<&SpecGroupTranslation>, sort_order: i32) -> Self {
        translation.map_or_else(
            || Self {
                sort_order,
                ..Self::default()
            },
            |t| Self {
                title: t.title.clone().unwrap_or_default(),
                description: t.description.clone().unwrap_or_default(),
                rows: t
                    .specs
                    .iter()
                    .map(|s| SpecRowDraft {
                        key: s.key.clone(),
                        value: s.value.clone(),
                        unit: s.unit.clone().unwrap_or_default(),
                    })
                    .collect(),
                sort_order,
            },
        )
    }

    #[must_use]
    pub fn payload(&self) -> ContentPayload {
        let specs = self
            .rows
            .iter()
            .filter_map(|row| {
                let key = row.key.trim();
                let value = row.value.trim();
                let unit = clean(&row.unit);
                // drop rows with nothing in them; keep partial rows
                if key.is_empty() && value.is_empty() && unit.is_none() {
                    return None;
                }
                Some(SpecItemPayload {
                    key: key.to_string(),
                    value: value.to_string(),
                    unit,
                })
            })
            .collect();

        ContentPayload::SpecGroup(SpecGroupPayload {
            title: clean(&self.title),
            description: clean(&self.description),
            specs,
            sort_order: self.sort_order,
        })
    }
}

// =============================================================================
// Table
// =============================================================================

/// Table drafts edit columns and rows as `|`-separated lines: one input for
/// the header row, one input per body row. Cells keep their position, so a
/// short line simply renders as empty trailing cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDraft {
    pub title: String,
    pub subtitle: String,
    pub columns: String,
    pub rows: Vec<String>,
    pub notes: String,
    pub sort_order: i32,
}

impl TableDraft {
    #[must_use]
    pub fn from_form(pairs: &[(String, String)]) -> Self {
        Self {
            title: text(pairs, "title"),
            subtitle: text(pairs, "subtitle"),
            columns: text(pairs, "columns"),
            rows: repeated(pairs, "rows"),
            notes: text(pairs, "notes"),
            sort_order: sort_order(pairs),
        }
    }

    #[must_use]
    pub fn from_translation(translation: Option<&TableTranslation>, sort_order: i32) -> Self {
        translation.map_or_else(
            || Self {
                sort_order,
                ..Self::default()
            },
            |t| Self {
                title: t.title.clone().unwrap_or_default(),
                subtitle: t.subtitle.clone().unwrap_or_default(),
                columns: t.columns.join(" | "),
                rows: t.rows.iter().map(|row| row.join(" | ")).collect(),
                notes: t.notes.clone().unwrap_or_default(),
                sort_order,
            },
        )
    }

    #[must_use]
    pub fn payload(&self) -> ContentPayload {
        let columns: Vec<String> = split_cells(&self.columns)
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|line| split_cells(line))
            .filter(|cells| cells.iter().any(|c| !c.is_empty()))
            .collect();

        ContentPayload::Table(TablePayload {
            title: clean(&self.title),
            subtitle: clean(&self.subtitle),
            columns,
            rows,
            notes: clean(&self.notes),
            sort_order: self.sort_order,
        })
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(CELL_SEPARATOR)
        .map(|cell| cell.trim().to_string())
        .collect()
}

// =============================================================================
// Product base info
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub slug: String,
    pub code: String,
    pub kind: String,
    pub status: String,
    pub name: String,
    pub description: String,
}

impl ProductDraft {
    #[must_use]
    pub fn from_form(pairs: &[(String, String)]) -> Self {
        Self {
            slug: text(pairs, "slug"),
            code: text(pairs, "code"),
            kind: text(pairs, "kind"),
            status: text(pairs, "status"),
            name: text(pairs, "name"),
            description: text(pairs, "description"),
        }
    }

    #[must_use]
    pub fn from_base_info(info: &BaseInfo) -> Self {
        Self {
            slug: info.slug.clone(),
            code: info.code.clone().unwrap_or_default(),
            kind: info.kind.to_string(),
            status: info.status.to_string(),
            name: info.name.clone().unwrap_or_default(),
            description: info.description.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn payload(&self) -> ProductPayload {
        ProductPayload {
            slug: clean(&self.slug),
            code: clean(&self.code),
            kind: Some(ProductKind::parse_or_default(self.kind.trim())),
            status: Some(ProductStatus::parse_or_default(self.status.trim())),
            category_id: None,
            name: clean(&self.name),
            description: clean(&self.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_paragraph_trim_and_omit() {
        let draft = ParagraphDraft::from_form(&pairs(&[
            ("title", "  Durability "),
            ("subtitle", "   "),
            ("full_text", "Built to last."),
            ("sort_order", "2"),
        ]));
        let json = serde_json::to_value(draft.payload()).expect("serialize");
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
    fn test_list_items_preserve_order_and_duplicates() {
        let draft = ListDraft::from_form(&pairs(&[
            ("title", "Applications"),
            ("items", "Facades"),
            ("items", "Paving"),
            ("items", "Facades"),
            ("sort_order", "1"),
        ]));
        let ContentPayload::List(payload) = draft.payload() else {
            panic!("expected list payload");
        };
        assert_eq!(payload.items, vec!["Facades", "Paving", "Facades"]);
    }

    #[test]
    fn test_item_removal_and_append_round_trip() {
        // start with A, B, C
        let draft = ListDraft::from_form(&pairs(&[
            ("items", "A"),
            ("items", "B"),
            ("items", "C"),
        ]));
        assert_eq!(draft.items, vec!["A", "B", "C"]);

        // the form re-submits without index 1
        let removed = ListDraft::from_form(&pairs(&[("items", "A"), ("items", "C")]));
        assert_eq!(removed.items, vec!["A", "C"]);

        // then with a new trailing entry
        let appended = ListDraft::from_form(&pairs(&[
            ("items", "A"),
            ("items", "C"),
            ("items", "D"),
        ]));
        assert_eq!(appended.items, vec!["A", "C", "D"]);
    }

    #[test]
    fn test_empty_item_filtering_is_idempotent() {
        let draft = ListDraft {
            items: vec!["A".to_string(), "  ".to_string(), String::new(), "B".to_string()],
            ..ListDraft::default()
        };
        let first = draft.payload();
        let second = draft.payload();
        assert_eq!(first, second);
        let ContentPayload::List(payload) = first else {
            panic!("expected list payload");
        };
        assert_eq!(payload.items, vec!["A", "B"]);
    }

    #[test]
    fn test_spec_row_filtering_scenario() {
        // one real row plus one entirely empty row
        let draft = SpecGroupDraft::from_form(&pairs(&[
            ("spec_key", "Weight"),
            ("spec_value", "12"),
            ("spec_unit", "kg"),
            ("spec_key", ""),
            ("spec_value", ""),
            ("spec_unit", ""),
        ]));
        let ContentPayload::SpecGroup(payload) = draft.payload() else {
            panic!("expected spec group payload");
        };
        assert_eq!(
            payload.specs,
            vec![SpecItemPayload {
                key: "Weight".to_string(),
                value: "12".to_string(),
                unit: Some("kg".to_string()),
            }]
        );
    }

    #[test]
    fn test_partial_spec_row_preserved() {
        let draft = SpecGroupDraft::from_form(&pairs(&[
            ("spec_key", "Fire rating"),
            ("spec_value", ""),
            ("spec_unit", ""),
        ]));
        let ContentPayload::SpecGroup(payload) = draft.payload() else {
            panic!("expected spec group payload");
        };
        assert_eq!(payload.specs.len(), 1);
        assert_eq!(payload.specs.first().map(|s| s.key.as_str()), Some("Fire rating"));
        assert_eq!(payload.specs.first().and_then(|s| s.unit.as_deref()), None);
    }

    #[test]
    fn test_table_rows_short_and_empty() {
        let draft = TableDraft::from_form(&pairs(&[
            ("columns", "Size | Weight | Pallet qty"),
            ("rows", "200mm | 3.1"),
            ("rows", " | | "),
            ("rows", "250mm | 3.9 | 120"),
        ]));
        let ContentPayload::Table(payload) = draft.payload() else {
            panic!("expected table payload");
        };
        assert_eq!(payload.columns, vec!["Size", "Weight", "Pallet qty"]);
        // the blank line is dropped, the short row is preserved as-is
        assert_eq!(
            payload.rows,
            vec![
                vec!["200mm".to_string(), "3.1".to_string()],
                vec!["250mm".to_string(), "3.9".to_string(), "120".to_string()],
            ]
        );
    }

    #[test]
    fn test_table_hydration_round_trip() {
        let translation = TableTranslation {
            locale: meridian_core::Locale::En,
            title: Some("Dimensions".to_string()),
            subtitle: None,
            columns: vec!["Size".to_string(), "Weight".to_string()],
            rows: vec![vec!["200mm".to_string(), "3.1".to_string()]],
            notes: None,
        };
        let draft = TableDraft::from_translation(Some(&translation), 4);
        assert_eq!(draft.columns, "Size | Weight");
        assert_eq!(draft.rows, vec!["200mm | 3.1"]);

        let ContentPayload::Table(payload) = draft.payload() else {
            panic!("expected table payload");
        };
        assert_eq!(payload.columns, translation.columns);
        assert_eq!(payload.rows, translation.rows);
    }

    #[test]
    fn test_hydration_without_translation_is_empty() {
        let draft = ParagraphDraft::from_translation(None, 7);
        assert_eq!(
            draft,
            ParagraphDraft {
                sort_order: 7,
                ..ParagraphDraft::default()
            }
        );
    }

    #[test]
    fn test_product_id_parsing() {
        assert_eq!(product_id(&pairs(&[("product_id", " 42 ")])), Some(42));
        assert_eq!(product_id(&pairs(&[("product_id", "x")])), None);
        assert_eq!(product_id(&pairs(&[])), None);
    }
}
