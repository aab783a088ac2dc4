//! Product route handlers: listing, base info, and the content detail page.

pub mod contents;
pub mod editor;
pub mod forms;
pub mod images;
pub mod layout;

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use meridian_catalog::{
    Block, BlockContent, Bundle, CatalogError, ContentKind, ImageGroup, LayoutOrdering,
    ListTranslation, ParagraphTranslation, ProductSummary, SpecGroupTranslation, TableTranslation,
};
use meridian_core::{Locale, ProductId, ProductStatus};

use crate::filters;
use crate::flash::{set_flash, take_flash, Flash};
use crate::middleware::CurrentLocale;
use crate::state::AppState;

use super::{render, Shell};
use editor::{EditorQuery, EditorState};
use forms::{ListDraft, ParagraphDraft, ProductDraft, SpecGroupDraft, TableDraft};

// =============================================================================
// Views
// =============================================================================

/// One row of the products table.
pub struct ProductRow {
    pub slug: String,
    pub name: Option<String>,
    pub kind_label: String,
    pub status_label: String,
    pub status_class: &'static str,
}

const fn status_class(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Draft => "badge-draft",
        ProductStatus::Published => "badge-published",
        ProductStatus::Archived => "badge-archived",
    }
}

impl From<ProductSummary> for ProductRow {
    fn from(summary: ProductSummary) -> Self {
        Self {
            slug: summary.slug,
            name: summary.name,
            kind_label: summary.kind.to_string(),
            status_label: summary.status.to_string(),
            status_class: status_class(summary.status),
        }
    }
}

/// Base info card on the detail page.
pub struct BaseInfoView {
    pub name: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub kind_label: String,
    pub status_label: String,
    pub status_class: &'static str,
    pub published_label: Option<String>,
}

impl BaseInfoView {
    fn from_bundle(bundle: &Bundle) -> Self {
        let info = &bundle.info;
        Self {
            name: info.name.clone(),
            description: info.description.clone(),
            code: info.code.clone(),
            kind_label: info.kind.to_string(),
            status_label: info.status.to_string(),
            status_class: status_class(info.status),
            published_label: info
                .published_at
                .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string()),
        }
    }
}

/// One block card on the detail page, in display order.
pub struct BlockView {
    pub id: i32,
    pub sort_order: i32,
    pub type_label: String,
    pub is_first: bool,
    pub is_last: bool,
    /// Edit/delete entry points; `None` for system and dangling blocks.
    pub actions: Option<BlockActions>,
    pub body: BlockBody,
}

pub struct BlockActions {
    pub edit_url: String,
    pub delete_action: String,
    /// Present only when the current locale actually has a translation.
    pub delete_translation_action: Option<String>,
}

/// Per-kind viewer content; the template matches exhaustively on this.
pub enum BlockBody {
    Paragraph(Option<ParagraphTranslation>),
    List(Option<ListTranslation>),
    SpecGroup(Option<SpecGroupTranslation>),
    Table(Option<TableTranslation>),
    /// Editable block whose referenced entity is absent from the bundle.
    Missing,
    /// Non-editable block; the string is its wire type name.
    System(String),
}

/// "Add X" links under the block list.
pub struct AddLink {
    pub url: String,
    pub label: &'static str,
}

/// Per-kind editor form state.
pub enum EditorForm {
    Paragraph(ParagraphDraft),
    List(ListDraft),
    SpecGroup(SpecGroupDraft),
    Table(TableDraft),
}

impl EditorForm {
    #[must_use]
    pub fn payload(&self) -> meridian_catalog::ContentPayload {
        match self {
            Self::Paragraph(draft) => draft.payload(),
            Self::List(draft) => draft.payload(),
            Self::SpecGroup(draft) => draft.payload(),
            Self::Table(draft) => draft.payload(),
        }
    }

    /// The draft's sort-order field, shared by every kind's form.
    #[must_use]
    pub const fn sort_order(&self) -> i32 {
        match self {
            Self::Paragraph(draft) => draft.sort_order,
            Self::List(draft) => draft.sort_order,
            Self::SpecGroup(draft) => draft.sort_order,
            Self::Table(draft) => draft.sort_order,
        }
    }

    fn parse(kind: ContentKind, pairs: &[(String, String)]) -> Self {
        match kind {
            ContentKind::Paragraph => Self::Paragraph(ParagraphDraft::from_form(pairs)),
            ContentKind::List => Self::List(ListDraft::from_form(pairs)),
            ContentKind::SpecGroup => Self::SpecGroup(SpecGroupDraft::from_form(pairs)),
            ContentKind::Table => Self::Table(TableDraft::from_form(pairs)),
        }
    }
}

/// The editor panel, when one is open.
pub struct EditorView {
    pub heading: String,
    pub action: String,
    pub cancel_url: String,
    pub form: EditorForm,
}

/// Everything the detail page renders when the bundle loaded.
pub struct ShowPage {
    pub product_id: i32,
    pub info: BaseInfoView,
    pub layout_name: String,
    pub layout_dirty: bool,
    pub blocks: Vec<BlockView>,
    pub image_groups: Vec<ImageGroup>,
    pub add_links: Vec<AddLink>,
    pub editor: Option<EditorView>,
}

// =============================================================================
// Templates
// =============================================================================

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub shell: Shell,
    pub products: Vec<ProductRow>,
    pub load_failed: bool,
}

/// Product create page template.
#[derive(Template)]
#[template(path = "products/new.html")]
pub struct ProductNewTemplate {
    pub shell: Shell,
    pub draft: ProductDraft,
}

/// Base info edit page template.
#[derive(Template)]
#[template(path = "products/edit.html")]
pub struct ProductEditTemplate {
    pub shell: Shell,
    pub slug: String,
    pub product_id: i32,
    pub draft: ProductDraft,
}

/// Product detail page template.
#[derive(Template)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub shell: Shell,
    pub slug: String,
    /// Set when the bundle could not be fetched; the page stays empty.
    pub error_message: Option<String>,
    pub page: Option<ShowPage>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Products list page handler.
#[instrument(skip(state, jar))]
pub async fn index(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    jar: CookieJar,
) -> Response {
    let (jar, flash) = take_flash(jar);

    let (products, load_failed) = match state.catalog().list_products(locale).await {
        Ok(list) => (list.into_iter().map(ProductRow::from).collect(), false),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (Vec::new(), true)
        }
    };

    let template = ProductsIndexTemplate {
        shell: Shell::new(locale, flash, "/products"),
        products,
        load_failed,
    };
    (jar, render(&template)).into_response()
}

/// Product create form.
pub async fn new_form(CurrentLocale(locale): CurrentLocale, jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(jar);
    let template = ProductNewTemplate {
        shell: Shell::new(locale, flash, "/products/new"),
        draft: ProductDraft::default(),
    };
    (jar, render(&template)).into_response()
}

/// Create a product from the submitted base info.
#[instrument(skip(state, jar, pairs))]
pub async fn create(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let draft = ProductDraft::from_form(&pairs);
    let payload = draft.payload();

    match state.catalog().create_product(&payload, locale).await {
        Ok(()) => {
            let slug = payload.slug.unwrap_or_default();
            let jar = set_flash(jar, &Flash::success("Product created"));
            (jar, Redirect::to(&format!("/products/{slug}"))).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "product create rejected");
            // keep the submitted draft on screen
            let template = ProductNewTemplate {
                shell: Shell::new(
                    locale,
                    Some(Flash::error(format!("Could not create product: {err}"))),
                    "/products/new",
                ),
                draft,
            };
            (jar, render(&template)).into_response()
        }
    }
}

/// Base info edit form, hydrated from the current bundle.
#[instrument(skip(state, jar))]
pub async fn edit_form(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(slug): Path<String>,
    jar: CookieJar,
) -> Response {
    let (jar, flash) = take_flash(jar);

    match state.catalog().get_bundle(&slug, locale).await {
        Ok(bundle) => {
            let template = ProductEditTemplate {
                shell: Shell::new(locale, flash, format!("/products/{slug}/edit")),
                product_id: bundle.info.id.as_i32(),
                draft: ProductDraft::from_base_info(&bundle.info),
                slug,
            };
            (jar, render(&template)).into_response()
        }
        Err(err) => {
            let jar = set_flash(jar, &load_failure_flash(&err));
            (jar, Redirect::to(&format!("/products/{slug}"))).into_response()
        }
    }
}

/// Apply a partial base info update.
#[instrument(skip(state, jar, pairs))]
pub async fn update(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(slug): Path<String>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let Some(product_id) = forms::product_id(&pairs) else {
        return crate::error::AppError::BadRequest("missing product id".to_string())
            .into_response();
    };
    let draft = ProductDraft::from_form(&pairs);

    match state
        .catalog()
        .update_product(ProductId::new(product_id), &draft.payload(), locale)
        .await
    {
        Ok(()) => {
            state.catalog().invalidate_bundle(&slug).await;
            let jar = set_flash(jar, &Flash::success("Product updated"));
            (jar, Redirect::to(&format!("/products/{slug}"))).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "product update rejected");
            let template = ProductEditTemplate {
                shell: Shell::new(
                    locale,
                    Some(Flash::error(format!("Could not update product: {err}"))),
                    format!("/products/{slug}/edit"),
                ),
                product_id,
                draft,
                slug,
            };
            (jar, render(&template)).into_response()
        }
    }
}

/// Product detail page handler.
#[instrument(skip(state, jar, query))]
pub async fn show(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(slug): Path<String>,
    Query(query): Query<EditorQuery>,
    jar: CookieJar,
) -> Response {
    let (jar, flash) = take_flash(jar);
    let editor_state = EditorState::from_query(&query);
    let template = build_show(&state, locale, &slug, editor_state, None, flash, &jar).await;
    (jar, render(&template)).into_response()
}

// =============================================================================
// Show-page assembly
// =============================================================================

fn load_failure_flash(err: &CatalogError) -> Flash {
    match err {
        CatalogError::NotFound(_) => Flash::error("Product not found"),
        _ => Flash::error("Failed to load content from the catalog service"),
    }
}

/// Fetch and assemble the detail page. `draft_override` carries the submitted
/// form back into the open editor after a rejected mutation, so the admin
/// never loses input.
pub(super) async fn build_show(
    state: &AppState,
    locale: Locale,
    slug: &str,
    editor_state: EditorState,
    draft_override: Option<EditorForm>,
    flash: Option<Flash>,
    jar: &CookieJar,
) -> ProductShowTemplate {
    let shell = Shell::new(locale, flash, format!("/products/{slug}"));

    match state.catalog().get_bundle(slug, locale).await {
        Ok(bundle) => ProductShowTemplate {
            shell,
            page: Some(build_page(slug, &bundle, editor_state, draft_override, jar)),
            error_message: None,
            slug: slug.to_string(),
        },
        Err(err) => {
            tracing::error!(error = %err, slug, "failed to load product bundle");
            let error_message = match err {
                CatalogError::NotFound(_) => format!("No product with slug \"{slug}\" exists."),
                _ => "Failed to load content from the catalog service. Try again.".to_string(),
            };
            ProductShowTemplate {
                shell,
                page: None,
                error_message: Some(error_message),
                slug: slug.to_string(),
            }
        }
    }
}

fn build_page(
    slug: &str,
    bundle: &Bundle,
    editor_state: EditorState,
    draft_override: Option<EditorForm>,
    jar: &CookieJar,
) -> ShowPage {
    let mut ordering = LayoutOrdering::new(bundle.layout.blocks.clone());
    ordering.apply_overrides(&layout::read_draft(jar, slug));

    let sorted = ordering.blocks();
    let last_index = sorted.len().saturating_sub(1);
    let blocks = sorted
        .iter()
        .enumerate()
        .map(|(index, block)| build_block_view(slug, bundle, block, index == 0, index == last_index))
        .collect();

    let add_links = ContentKind::ALL
        .into_iter()
        .map(|kind| AddLink {
            url: format!("/products/{slug}?add={kind}"),
            label: kind.label(),
        })
        .collect();

    ShowPage {
        product_id: bundle.info.id.as_i32(),
        info: BaseInfoView::from_bundle(bundle),
        layout_name: bundle.layout.name.clone(),
        layout_dirty: ordering.is_dirty(),
        blocks,
        image_groups: bundle.image_groups.clone(),
        add_links,
        editor: build_editor(slug, bundle, editor_state, draft_override),
    }
}

fn build_block_view(
    slug: &str,
    bundle: &Bundle,
    block: &Block,
    is_first: bool,
    is_last: bool,
) -> BlockView {
    let (type_label, actions, body) = match &block.content {
        BlockContent::Paragraph(id) => match bundle.paragraph(*id) {
            Some(paragraph) => (
                ContentKind::Paragraph.label().to_string(),
                Some(block_actions(
                    slug,
                    ContentKind::Paragraph,
                    id.as_i32(),
                    paragraph.translation.is_some(),
                )),
                BlockBody::Paragraph(paragraph.translation.clone()),
            ),
            None => dangling(ContentKind::Paragraph),
        },
        BlockContent::List(id) => match bundle.list(*id) {
            Some(list) => (
                ContentKind::List.label().to_string(),
                Some(block_actions(
                    slug,
                    ContentKind::List,
                    id.as_i32(),
                    list.translation.is_some(),
                )),
                BlockBody::List(list.translation.clone()),
            ),
            None => dangling(ContentKind::List),
        },
        BlockContent::SpecGroup(id) => match bundle.spec_group(*id) {
            Some(group) => (
                ContentKind::SpecGroup.label().to_string(),
                Some(block_actions(
                    slug,
                    ContentKind::SpecGroup,
                    id.as_i32(),
                    group.translation.is_some(),
                )),
                BlockBody::SpecGroup(group.translation.clone()),
            ),
            None => dangling(ContentKind::SpecGroup),
        },
        BlockContent::Table(id) => match bundle.table(*id) {
            Some(table) => (
                ContentKind::Table.label().to_string(),
                Some(block_actions(
                    slug,
                    ContentKind::Table,
                    id.as_i32(),
                    table.translation.is_some(),
                )),
                BlockBody::Table(table.translation.clone()),
            ),
            None => dangling(ContentKind::Table),
        },
        BlockContent::System(kind) => (
            format!("System block ({})", kind.type_name()),
            None,
            BlockBody::System(kind.type_name().to_string()),
        ),
    };

    BlockView {
        id: block.id.as_i32(),
        sort_order: block.sort_order,
        type_label,
        is_first,
        is_last,
        actions,
        body,
    }
}

fn dangling(kind: ContentKind) -> (String, Option<BlockActions>, BlockBody) {
    (
        format!("{} (content missing)", kind.label()),
        None,
        BlockBody::Missing,
    )
}

fn block_actions(
    slug: &str,
    kind: ContentKind,
    content_id: i32,
    has_translation: bool,
) -> BlockActions {
    BlockActions {
        edit_url: format!("/products/{slug}?edit={kind}:{content_id}"),
        delete_action: format!("/products/{slug}/contents/{kind}/{content_id}/delete"),
        delete_translation_action: has_translation
            .then(|| format!("/products/{slug}/contents/{kind}/{content_id}/delete-translation")),
    }
}

/// Default sort order for new content: after everything currently laid out.
fn next_sort_order(bundle: &Bundle) -> i32 {
    bundle
        .layout
        .blocks
        .iter()
        .map(|b| b.sort_order)
        .max()
        .map_or(0, |max| max + 1)
}

fn build_editor(
    slug: &str,
    bundle: &Bundle,
    state: EditorState,
    draft_override: Option<EditorForm>,
) -> Option<EditorView> {
    match state {
        EditorState::Viewing => None,
        EditorState::Adding(kind) => {
            let form = draft_override.unwrap_or_else(|| empty_form(kind, next_sort_order(bundle)));
            Some(EditorView {
                heading: format!("Add {}", kind.label().to_lowercase()),
                action: format!("/products/{slug}/contents/{kind}"),
                cancel_url: format!("/products/{slug}"),
                form,
            })
        }
        EditorState::Editing(kind, content_id) => {
            let form = match draft_override {
                Some(form) => Some(form),
                // hydrate from the current locale's translation; empty when
                // none exists yet (submitting creates it for this locale)
                None => hydrated_form(bundle, kind, content_id),
            }?;
            Some(EditorView {
                heading: format!("Edit {} #{content_id}", kind.label().to_lowercase()),
                action: format!("/products/{slug}/contents/{kind}/{content_id}"),
                cancel_url: format!("/products/{slug}"),
                form,
            })
        }
    }
}

fn empty_form(kind: ContentKind, sort_order: i32) -> EditorForm {
    match kind {
        ContentKind::Paragraph => EditorForm::Paragraph(ParagraphDraft {
            sort_order,
            ..ParagraphDraft::default()
        }),
        ContentKind::List => EditorForm::List(ListDraft {
            sort_order,
            ..ListDraft::default()
        }),
        ContentKind::SpecGroup => EditorForm::SpecGroup(SpecGroupDraft {
            sort_order,
            ..SpecGroupDraft::default()
        }),
        ContentKind::Table => EditorForm::Table(TableDraft {
            sort_order,
            ..TableDraft::default()
        }),
    }
}

fn hydrated_form(bundle: &Bundle, kind: ContentKind, content_id: i32) -> Option<EditorForm> {
    match kind {
        ContentKind::Paragraph => bundle.paragraph(content_id.into()).map(|p| {
            EditorForm::Paragraph(ParagraphDraft::from_translation(
                p.translation.as_ref(),
                p.sort_order,
            ))
        }),
        ContentKind::List => bundle.list(content_id.into()).map(|l| {
            EditorForm::List(ListDraft::from_translation(
                l.translation.as_ref(),
                l.sort_order,
            ))
        }),
        ContentKind::SpecGroup => bundle.spec_group(content_id.into()).map(|g| {
            EditorForm::SpecGroup(SpecGroupDraft::from_translation(
                g.translation.as_ref(),
                g.sort_order,
            ))
        }),
        ContentKind::Table => bundle.table(content_id.into()).map(|t| {
            EditorForm::Table(TableDraft::from_translation(
                t.translation.as_ref(),
                t.sort_order,
            ))
        }),
    }
}
