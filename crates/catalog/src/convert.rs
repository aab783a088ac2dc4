//! Bundle normalization.
//!
//! Turns a [`RawBundle`] into the uniform in-memory model the front-ends
//! render from: a sorted block layout plus per-type content maps keyed by
//! content id. Total by construction - every optional wire field has an
//! explicit default, collections always normalize to (possibly empty)
//! vectors, and unknown enum values degrade instead of erroring. The only
//! entries dropped are wrapper payloads with no id at all, which are logged
//! and skipped.

use std::collections::HashMap;

use meridian_core::{
    BlockId, CategoryId, ImageGroupId, ImageId, LayoutId, ListId, Locale, ParagraphId, ProductId,
    ProductKind, ProductStatus, SpecGroupId, TableId,
};

use crate::raw::{
    RawBaseInfo, RawBlock, RawBundle, RawImage, RawImageGroup, RawLayout, RawListEntry,
    RawParagraph, RawProductSummary, RawSpecGroupEntry, RawSpecItem, RawTableEntry,
};
use crate::types::{
    BaseInfo, Block, BlockContent, Bundle, Image, ImageGroup, Layout, List, ListTranslation,
    Paragraph, ParagraphTranslation, ProductSummary, SpecGroup, SpecGroupTranslation, SpecItem,
    SystemBlockKind, Table, TableTranslation,
};

/// Normalize a raw bundle fetched for `locale`.
///
/// `locale` is the locale the request carried; it stamps synthesized
/// translations whose wire payload omits its own locale code.
#[must_use]
pub fn normalize(raw: RawBundle, locale: Locale) -> Bundle {
    let info = convert_base_info(raw.product.unwrap_or_default());
    let layout = convert_layout(raw.layout.unwrap_or_default());

    let paragraphs: HashMap<ParagraphId, Paragraph> = raw
        .paragraphs
        .into_iter()
        .filter_map(|p| convert_paragraph(p, locale))
        .map(|p| (p.id, p))
        .collect();

    let lists: HashMap<ListId, List> = raw
        .lists
        .into_iter()
        .filter_map(|entry| unwrap_keyed(entry, "list"))
        .filter_map(|(key, payload)| convert_list(&key, payload, locale))
        .map(|l| (l.id, l))
        .collect();

    let spec_groups: HashMap<SpecGroupId, SpecGroup> = raw
        .spec_groups
        .into_iter()
        .filter_map(|entry| unwrap_keyed(entry, "spec group"))
        .filter_map(|(key, payload)| convert_spec_group(&key, payload, locale))
        .map(|g| (g.id, g))
        .collect();

    let tables: HashMap<TableId, Table> = raw
        .tables
        .into_iter()
        .filter_map(|entry| unwrap_keyed(entry, "table"))
        .filter_map(|(_, payload)| convert_table(payload, locale))
        .map(|t| (t.id, t))
        .collect();

    let mut image_groups: Vec<ImageGroup> = raw
        .image_groups
        .into_iter()
        .filter_map(convert_image_group)
        .collect();
    image_groups.sort_by_key(|g| (g.sort_order, g.id));

    Bundle {
        info,
        layout,
        paragraphs,
        lists,
        spec_groups,
        tables,
        image_groups,
    }
}

/// Convert one row of the product listing.
#[must_use]
pub fn convert_summary(raw: RawProductSummary) -> Option<ProductSummary> {
    let Some(id) = raw.id else {
        tracing::warn!("skipping product summary without id");
        return None;
    };
    Some(ProductSummary {
        id: ProductId::new(id),
        slug: raw.slug.unwrap_or_default(),
        name: raw.name.filter(|n| !n.is_empty()),
        kind: ProductKind::parse_or_default(raw.kind.as_deref().unwrap_or_default()),
        status: ProductStatus::parse_or_default(raw.status.as_deref().unwrap_or_default()),
    })
}

fn convert_base_info(raw: RawBaseInfo) -> BaseInfo {
    BaseInfo {
        id: ProductId::new(raw.id.unwrap_or_default()),
        slug: raw.slug.unwrap_or_default(),
        code: raw.code.filter(|c| !c.is_empty()),
        kind: ProductKind::parse_or_default(raw.kind.as_deref().unwrap_or_default()),
        status: ProductStatus::parse_or_default(raw.status.as_deref().unwrap_or_default()),
        published_at: raw.published_at,
        category_id: raw.category_id.map(CategoryId::new),
        name: raw.name.filter(|n| !n.is_empty()),
        description: raw.description.filter(|d| !d.is_empty()),
    }
}

fn convert_layout(raw: RawLayout) -> Layout {
    let mut blocks: Vec<Block> = raw.blocks.into_iter().filter_map(convert_block).collect();
    // (sort_order, id) is the total display order everywhere downstream
    blocks.sort_by_key(Block::sort_key);

    Layout {
        id: LayoutId::new(raw.id.unwrap_or_default()),
        name: raw.name.unwrap_or_default(),
        is_default: raw.is_default.unwrap_or(false),
        blocks,
    }
}

fn convert_block(raw: RawBlock) -> Option<Block> {
    let Some(id) = raw.id else {
        tracing::warn!("skipping layout block without id");
        return None;
    };

    let type_name = raw.block_type.unwrap_or_default();
    // An editable type missing its ref degrades to an inert system card so the
    // slot still shows up in the right position.
    let content = match (type_name.as_str(), raw.ref_id) {
        ("content_paragraph", Some(r)) => BlockContent::Paragraph(ParagraphId::new(r)),
        ("list", Some(r)) => BlockContent::List(ListId::new(r)),
        ("spec_group", Some(r)) => BlockContent::SpecGroup(SpecGroupId::new(r)),
        ("table", Some(r)) => BlockContent::Table(TableId::new(r)),
        (name, _) => BlockContent::System(SystemBlockKind::from_type_name(name)),
    };

    Some(Block {
        id: BlockId::new(id),
        sort_order: raw.sort_order.unwrap_or_default(),
        content,
    })
}

/// Pull the single `(key, payload)` pair out of a wrapper object. Entries
/// with more than one key should not occur; if one does, the first pair in
/// iteration order wins.
fn unwrap_keyed<T>(mut entry: HashMap<String, T>, what: &str) -> Option<(String, T)> {
    let key = entry.keys().next().cloned();
    match key {
        Some(key) => {
            let payload = entry.remove(&key)?;
            Some((key, payload))
        }
        None => {
            tracing::warn!("skipping empty {what} wrapper object");
            None
        }
    }
}

fn convert_paragraph(raw: RawParagraph, locale: Locale) -> Option<Paragraph> {
    let Some(id) = raw.id else {
        tracing::warn!("skipping paragraph without id");
        return None;
    };
    Some(Paragraph {
        id: ParagraphId::new(id),
        sort_order: raw.sort_order.unwrap_or_default(),
        translation: raw.translation.map(|t| ParagraphTranslation {
            locale: t
                .locale
                .as_deref()
                .map_or(locale, Locale::parse_or_default),
            title: t.title,
            subtitle: t.subtitle,
            full_text: t.full_text,
        }),
    })
}

fn convert_list(wrapper_key: &str, raw: RawListEntry, locale: Locale) -> Option<List> {
    let Some(id) = raw.id else {
        tracing::warn!(wrapper_key, "skipping list payload without id");
        return None;
    };
    Some(List {
        id: ListId::new(id),
        slug: slug_or_wrapper_key(raw.slug, wrapper_key),
        sort_order: raw.sort_order.unwrap_or_default(),
        translation: raw.locale.as_deref().map(|code| ListTranslation {
            locale: Locale::from_code(code).unwrap_or(locale),
            title: raw.title,
            description: raw.description,
            items: raw.items.unwrap_or_default(),
        }),
    })
}

fn convert_spec_group(
    wrapper_key: &str,
    raw: RawSpecGroupEntry,
    locale: Locale,
) -> Option<SpecGroup> {
    let Some(id) = raw.id else {
        tracing::warn!(wrapper_key, "skipping spec group payload without id");
        return None;
    };
    Some(SpecGroup {
        id: SpecGroupId::new(id),
        slug: slug_or_wrapper_key(raw.slug, wrapper_key),
        sort_order: raw.sort_order.unwrap_or_default(),
        translation: raw.locale.as_deref().map(|code| SpecGroupTranslation {
            locale: Locale::from_code(code).unwrap_or(locale),
            title: raw.title,
            description: raw.description,
            specs: raw
                .specs
                .unwrap_or_default()
                .into_iter()
                .map(convert_spec_item)
                .collect(),
        }),
    })
}

fn convert_spec_item(raw: RawSpecItem) -> SpecItem {
    SpecItem {
        key: raw.key.unwrap_or_default(),
        value: raw.value.unwrap_or_default(),
        unit: raw.unit.filter(|u| !u.is_empty()),
    }
}

fn convert_table(raw: RawTableEntry, locale: Locale) -> Option<Table> {
    let Some(id) = raw.id else {
        tracing::warn!("skipping table payload without id");
        return None;
    };
    Some(Table {
        id: TableId::new(id),
        sort_order: raw.sort_order.unwrap_or_default(),
        translation: raw.locale.as_deref().map(|code| TableTranslation {
            locale: Locale::from_code(code).unwrap_or(locale),
            title: raw.title,
            subtitle: raw.subtitle,
            columns: raw.columns.unwrap_or_default(),
            rows: raw.rows.unwrap_or_default(),
            notes: raw.notes,
        }),
    })
}

/// The wrapper key is only ever used as a slug fallback - ids always come
/// from the payload itself.
fn slug_or_wrapper_key(slug: Option<String>, wrapper_key: &str) -> String {
    slug.filter(|s| !s.is_empty())
        .unwrap_or_else(|| wrapper_key.to_string())
}

fn convert_image_group(raw: RawImageGroup) -> Option<ImageGroup> {
    let Some(id) = raw.id else {
        tracing::warn!("skipping image group without id");
        return None;
    };
    let mut images: Vec<Image> = raw.images.into_iter().filter_map(convert_image).collect();
    images.sort_by_key(|i| (i.sort_order, i.id));
    Some(ImageGroup {
        id: ImageGroupId::new(id),
        name: raw.name.unwrap_or_default(),
        sort_order: raw.sort_order.unwrap_or_default(),
        images,
    })
}

fn convert_image(raw: RawImage) -> Option<Image> {
    let Some(id) = raw.id else {
        tracing::warn!("skipping image without id");
        return None;
    };
    Some(Image {
        id: ImageId::new(id),
        url: raw.url.unwrap_or_default(),
        alt: raw.alt.filter(|a| !a.is_empty()),
        sort_order: raw.sort_order.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_bundle(json: serde_json::Value) -> Bundle {
        let raw: RawBundle = serde_json::from_value(json).expect("raw bundle");
        normalize(raw, Locale::En)
    }

    #[test]
    fn test_empty_bundle_normalizes_to_defaults() {
        let bundle = parse_bundle(serde_json::json!({}));
        assert_eq!(bundle.info.id, ProductId::new(0));
        assert_eq!(bundle.info.status, ProductStatus::Draft);
        assert_eq!(bundle.info.kind, ProductKind::Product);
        assert!(bundle.layout.blocks.is_empty());
        assert!(bundle.paragraphs.is_empty());
        assert!(bundle.lists.is_empty());
        assert!(bundle.spec_groups.is_empty());
        assert!(bundle.tables.is_empty());
        assert!(bundle.image_groups.is_empty());
    }

    #[test]
    fn test_blocks_sorted_by_sort_order_then_id() {
        let bundle = parse_bundle(serde_json::json!({
            "layout": {
                "id": 1,
                "blocks": [
                    {"id": 9, "block_type": "basic", "sort_order": 2},
                    {"id": 4, "block_type": "images", "sort_order": 2},
                    {"id": 7, "block_type": "content_paragraph", "ref_id": 12, "sort_order": 1},
                ],
            },
        }));
        let ids: Vec<i32> = bundle
            .layout
            .blocks
            .iter()
            .map(|b| b.id.as_i32())
            .collect();
        // sort_order first, block id as the deterministic tie-break
        assert_eq!(ids, vec![7, 4, 9]);
    }

    #[test]
    fn test_editable_block_without_ref_becomes_system() {
        let bundle = parse_bundle(serde_json::json!({
            "layout": {
                "id": 1,
                "blocks": [{"id": 3, "block_type": "list", "sort_order": 0}],
            },
        }));
        let block = bundle.layout.blocks.first().expect("one block");
        assert_eq!(
            block.content,
            BlockContent::System(SystemBlockKind::Other("list".to_string()))
        );
        assert!(!block.is_editable());
    }

    #[test]
    fn test_unknown_block_type_is_inert_not_error() {
        let bundle = parse_bundle(serde_json::json!({
            "layout": {
                "id": 1,
                "blocks": [{"id": 3, "block_type": "hero_video", "ref_id": 5, "sort_order": 0}],
            },
        }));
        let block = bundle.layout.blocks.first().expect("one block");
        assert_eq!(
            block.content,
            BlockContent::System(SystemBlockKind::Other("hero_video".to_string()))
        );
    }

    #[test]
    fn test_wrapper_key_absorbed_id_from_payload() {
        let bundle = parse_bundle(serde_json::json!({
            "lists": [
                {"list-7": {
                    "id": 31,
                    "sort_order": 1,
                    "locale": "en",
                    "title": "Applications",
                    "items": ["Facades", "Paving"],
                }},
            ],
        }));
        // id 31 from the payload, not 7 from the wrapper key
        let list = bundle.lists.get(&ListId::new(31)).expect("list by id");
        assert!(!bundle.lists.contains_key(&ListId::new(7)));
        // no slug in the payload, so the wrapper key becomes the slug
        assert_eq!(list.slug, "list-7");
        let translation = list.translation.as_ref().expect("translated");
        assert_eq!(translation.items, vec!["Facades", "Paving"]);
    }

    #[test]
    fn test_explicit_slug_wins_over_wrapper_key() {
        let bundle = parse_bundle(serde_json::json!({
            "spec_groups": [
                {"spec-2": {"id": 2, "slug": "mechanical", "locale": "en"}},
            ],
        }));
        let group = bundle
            .spec_groups
            .get(&SpecGroupId::new(2))
            .expect("spec group");
        assert_eq!(group.slug, "mechanical");
    }

    #[test]
    fn test_missing_translation_is_valid() {
        let bundle = parse_bundle(serde_json::json!({
            "paragraphs": [{"id": 5, "sort_order": 0}],
            "lists": [{"list-9": {"id": 9, "sort_order": 0}}],
        }));
        let paragraph = bundle
            .paragraphs
            .get(&ParagraphId::new(5))
            .expect("paragraph");
        assert!(paragraph.translation.is_none());
        // wrapper payload without a locale field: entity exists, no translation
        let list = bundle.lists.get(&ListId::new(9)).expect("list");
        assert!(list.translation.is_none());
    }

    #[test]
    fn test_translated_collections_default_to_empty() {
        let bundle = parse_bundle(serde_json::json!({
            "tables": [{"table-4": {"id": 4, "locale": "de", "title": "Maße"}}],
            "spec_groups": [{"spec-1": {"id": 1, "locale": "de"}}],
        }));
        let table = bundle.tables.get(&TableId::new(4)).expect("table");
        let translation = table.translation.as_ref().expect("translated");
        assert_eq!(translation.locale, Locale::De);
        assert!(translation.columns.is_empty());
        assert!(translation.rows.is_empty());
        let group = bundle
            .spec_groups
            .get(&SpecGroupId::new(1))
            .expect("spec group");
        assert!(group.translation.as_ref().expect("translated").specs.is_empty());
    }

    #[test]
    fn test_idless_payloads_skipped() {
        let bundle = parse_bundle(serde_json::json!({
            "paragraphs": [{"sort_order": 3}],
            "lists": [{"list-8": {"slug": "orphan"}}],
            "image_groups": [{"name": "Gallery"}],
        }));
        assert!(bundle.paragraphs.is_empty());
        assert!(bundle.lists.is_empty());
        assert!(bundle.image_groups.is_empty());
    }

    #[test]
    fn test_spec_items_default_key_value() {
        let bundle = parse_bundle(serde_json::json!({
            "spec_groups": [
                {"spec-1": {
                    "id": 1,
                    "locale": "en",
                    "specs": [
                        {"key": "Weight", "value": "12", "unit": "kg"},
                        {"value": "orphan value"},
                    ],
                }},
            ],
        }));
        let group = bundle
            .spec_groups
            .get(&SpecGroupId::new(1))
            .expect("spec group");
        let specs = &group.translation.as_ref().expect("translated").specs;
        assert_eq!(specs.len(), 2);
        assert_eq!(
            specs.first(),
            Some(&SpecItem {
                key: "Weight".to_string(),
                value: "12".to_string(),
                unit: Some("kg".to_string()),
            })
        );
        assert_eq!(specs.get(1).map(|s| s.key.as_str()), Some(""));
    }

    #[test]
    fn test_images_sorted_within_group() {
        let bundle = parse_bundle(serde_json::json!({
            "image_groups": [{
                "id": 1,
                "name": "Gallery",
                "sort_order": 0,
                "images": [
                    {"id": 3, "url": "/b.jpg", "sort_order": 2},
                    {"id": 1, "url": "/a.jpg", "sort_order": 1},
                ],
            }],
        }));
        let group = bundle.image_groups.first().expect("group");
        let urls: Vec<&str> = group.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["/a.jpg", "/b.jpg"]);
    }

    #[test]
    fn test_unknown_locale_code_falls_back_to_request_locale() {
        let raw: RawBundle = serde_json::from_value(serde_json::json!({
            "lists": [{"list-1": {"id": 1, "locale": "xx", "title": "?"}}],
        }))
        .expect("raw bundle");
        let bundle = normalize(raw, Locale::Fr);
        let list = bundle.lists.get(&ListId::new(1)).expect("list");
        assert_eq!(
            list.translation.as_ref().expect("translated").locale,
            Locale::Fr
        );
    }
}
