//! Editor state for the product detail page.
//!
//! At most one content editor can be open at a time, across every block on
//! the page. That invariant is structural here: the state is a single value
//! parsed from a single query-string slot, so opening another editor link
//! simply replaces the previous state (abandoning any in-progress draft
//! without a prompt).

use serde::Deserialize;

use meridian_catalog::ContentKind;

/// What the detail page is doing besides viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    /// Read-only rendering of every block.
    #[default]
    Viewing,
    /// Composing a brand-new entity of the given kind.
    Adding(ContentKind),
    /// Editing the active locale's translation of an existing entity.
    Editing(ContentKind, i32),
}

/// Query parameters feeding [`EditorState`].
#[derive(Debug, Default, Deserialize)]
pub struct EditorQuery {
    /// `?add=paragraph`
    pub add: Option<String>,
    /// `?edit=table:12`
    pub edit: Option<String>,
}

impl EditorState {
    /// Parse the query slot. `add` wins when both are present; anything
    /// malformed degrades to viewing.
    #[must_use]
    pub fn from_query(query: &EditorQuery) -> Self {
        if let Some(kind) = query.add.as_deref().and_then(|s| s.parse().ok()) {
            return Self::Adding(kind);
        }
        if let Some((kind, id)) = query.edit.as_deref().and_then(parse_edit) {
            return Self::Editing(kind, id);
        }
        Self::Viewing
    }
}

fn parse_edit(value: &str) -> Option<(ContentKind, i32)> {
    let (kind, id) = value.split_once(':')?;
    Some((kind.parse().ok()?, id.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(add: Option<&str>, edit: Option<&str>) -> EditorQuery {
        EditorQuery {
            add: add.map(String::from),
            edit: edit.map(String::from),
        }
    }

    #[test]
    fn test_default_is_viewing() {
        assert_eq!(
            EditorState::from_query(&EditorQuery::default()),
            EditorState::Viewing
        );
    }

    #[test]
    fn test_add_and_edit_parse() {
        assert_eq!(
            EditorState::from_query(&query(Some("paragraph"), None)),
            EditorState::Adding(ContentKind::Paragraph)
        );
        assert_eq!(
            EditorState::from_query(&query(None, Some("spec-group:7"))),
            EditorState::Editing(ContentKind::SpecGroup, 7)
        );
    }

    #[test]
    fn test_single_slot_add_wins() {
        // both present: one editor, not two
        assert_eq!(
            EditorState::from_query(&query(Some("list"), Some("table:3"))),
            EditorState::Adding(ContentKind::List)
        );
    }

    #[test]
    fn test_malformed_values_degrade_to_viewing() {
        for edit in ["table", "table:", "table:abc", ":3", "images:3"] {
            assert_eq!(
                EditorState::from_query(&query(None, Some(edit))),
                EditorState::Viewing,
                "edit={edit}"
            );
        }
        assert_eq!(
            EditorState::from_query(&query(Some("custom_html"), None)),
            EditorState::Viewing
        );
    }
}
