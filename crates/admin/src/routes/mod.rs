//! Route handlers and router assembly.

pub mod locale;
pub mod products;

use askama::Template;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;

use meridian_core::Locale;

use crate::flash::Flash;
use crate::state::AppState;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/locale", post(locale::switch))
        .route("/products", get(products::index).post(products::create))
        .route("/products/new", get(products::new_form))
        .route("/products/{slug}", get(products::show))
        .route(
            "/products/{slug}/edit",
            get(products::edit_form).post(products::update),
        )
        .route(
            "/products/{slug}/contents/{kind}",
            post(products::contents::create),
        )
        .route(
            "/products/{slug}/contents/{kind}/{content_id}",
            post(products::contents::update),
        )
        .route(
            "/products/{slug}/contents/{kind}/{content_id}/delete",
            post(products::contents::delete_entity),
        )
        .route(
            "/products/{slug}/contents/{kind}/{content_id}/delete-translation",
            post(products::contents::delete_translation),
        )
        .route("/products/{slug}/layout/move", post(products::layout::move_block))
        .route("/products/{slug}/layout/reset", post(products::layout::reset))
        .route("/products/{slug}/layout/save", post(products::layout::save))
        .route(
            "/products/{slug}/image-groups",
            post(products::images::create_group),
        )
        .route("/products/{slug}/images", post(products::images::upload))
        .route(
            "/products/{slug}/images/{image_id}/delete",
            post(products::images::delete),
        )
}

async fn root() -> Redirect {
    Redirect::to("/products")
}

/// Data every page hands to the base layout: active locale, pending flash
/// message, and the locale switcher.
pub struct Shell {
    pub locale: Locale,
    pub flash: Option<Flash>,
    /// Path the locale switcher returns to.
    pub next: String,
    pub locales: Vec<LocaleOption>,
}

pub struct LocaleOption {
    pub code: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

impl Shell {
    #[must_use]
    pub fn new(locale: Locale, flash: Option<Flash>, next: impl Into<String>) -> Self {
        let locales = Locale::ALL
            .into_iter()
            .map(|option| LocaleOption {
                code: option.as_str(),
                name: option.native_name(),
                selected: option == locale,
            })
            .collect();
        Self {
            locale,
            flash,
            next: next.into(),
            locales,
        }
    }
}

/// Render a template, logging failures instead of propagating them.
pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}
