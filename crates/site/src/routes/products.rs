//! Public catalog pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use meridian_catalog::{
    BlockContent, Bundle, ImageGroup, LayoutOrdering, ListTranslation, ParagraphTranslation,
    SpecGroupTranslation, TableTranslation,
};
use meridian_core::ProductStatus;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CurrentLocale;
use crate::state::AppState;

use super::Shell;

/// Product card on the catalog index.
pub struct ProductCard {
    pub slug: String,
    pub name: Option<String>,
    pub kind_label: String,
}

/// One content block on the product page, in display order.
///
/// Only the four content kinds render publicly; system blocks belong to
/// other parts of the platform and are skipped here, as are blocks whose
/// referenced entity is gone.
pub enum SiteBlock {
    Paragraph(Option<ParagraphTranslation>),
    List(Option<ListTranslation>),
    SpecGroup(Option<SpecGroupTranslation>),
    Table(Option<TableTranslation>),
}

/// Catalog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub shell: Shell,
    pub products: Vec<ProductCard>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub shell: Shell,
    pub name: Option<String>,
    pub description: Option<String>,
    pub blocks: Vec<SiteBlock>,
    pub image_groups: Vec<ImageGroup>,
}

/// Catalog index: every published product, localized.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
) -> Result<ProductsIndexTemplate> {
    let products = state
        .catalog()
        .list_products(locale)
        .await?
        .into_iter()
        .filter(|summary| summary.status == ProductStatus::Published)
        .map(|summary| ProductCard {
            slug: summary.slug,
            name: summary.name,
            kind_label: summary.kind.to_string(),
        })
        .collect();

    Ok(ProductsIndexTemplate {
        shell: Shell::new(locale, "/products"),
        products,
    })
}

/// Product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let bundle = state.catalog().get_bundle(&slug, locale).await?;
    if bundle.info.status != ProductStatus::Published {
        return Err(AppError::NotFound(format!("product not published: {slug}")));
    }

    let blocks = build_blocks(&bundle);

    Ok(ProductShowTemplate {
        shell: Shell::new(locale, format!("/products/{slug}")),
        name: bundle.info.name.clone(),
        description: bundle.info.description.clone(),
        blocks,
        image_groups: bundle.image_groups,
    })
}

fn build_blocks(bundle: &Bundle) -> Vec<SiteBlock> {
    let ordering = LayoutOrdering::new(bundle.layout.blocks.clone());
    ordering
        .blocks()
        .iter()
        .filter_map(|block| match &block.content {
            BlockContent::Paragraph(id) => bundle
                .paragraph(*id)
                .map(|p| SiteBlock::Paragraph(p.translation.clone())),
            BlockContent::List(id) => bundle
                .list(*id)
                .map(|l| SiteBlock::List(l.translation.clone())),
            BlockContent::SpecGroup(id) => bundle
                .spec_group(*id)
                .map(|g| SiteBlock::SpecGroup(g.translation.clone())),
            BlockContent::Table(id) => bundle
                .table(*id)
                .map(|t| SiteBlock::Table(t.translation.clone())),
            BlockContent::System(_) => None,
        })
        .collect()
}
