//! Content CRUD handlers.
//!
//! Success follows the reload-after-write policy: invalidate anything cached,
//! flash the outcome, and redirect back to the detail page so the next render
//! reflects server truth. A rejected mutation re-renders the page still in
//! its Adding/Editing state with the submitted draft intact.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use meridian_catalog::ContentKind;
use meridian_core::ProductId;

use crate::error::AppError;
use crate::flash::{set_flash, Flash};
use crate::middleware::CurrentLocale;
use crate::state::AppState;

use super::editor::EditorState;
use super::{build_show, forms, EditorForm};
use crate::routes::render;

fn parse_kind(kind: &str) -> Result<ContentKind, AppError> {
    kind.parse()
        .map_err(|_| AppError::NotFound(format!("unknown content kind: {kind}")))
}

fn require_product_id(pairs: &[(String, String)]) -> Result<ProductId, AppError> {
    forms::product_id(pairs)
        .map(ProductId::new)
        .ok_or_else(|| AppError::BadRequest("missing product id".to_string()))
}

/// Create a content entity (plus its translation and block, server side).
#[instrument(skip(state, jar, pairs))]
pub async fn create(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path((slug, kind)): Path<(String, String)>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(err) => return err.into_response(),
    };
    let product = match require_product_id(&pairs) {
        Ok(product) => product,
        Err(err) => return err.into_response(),
    };

    let form = EditorForm::parse(kind, &pairs);
    match state
        .catalog()
        .create_content(product, locale, &form.payload())
        .await
    {
        Ok(()) => {
            state.catalog().invalidate_bundle(&slug).await;
            let jar = set_flash(jar, &Flash::success(format!("{} created", kind.label())));
            (jar, Redirect::to(&format!("/products/{slug}"))).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, %kind, "content create rejected");
            let template = build_show(
                &state,
                locale,
                &slug,
                EditorState::Adding(kind),
                Some(form),
                Some(Flash::error(format!("Could not save: {err}"))),
                &jar,
            )
            .await;
            (jar, render(&template)).into_response()
        }
    }
}

/// Upsert the active locale's translation on an existing entity.
#[instrument(skip(state, jar, pairs))]
pub async fn update(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path((slug, kind, content_id)): Path<(String, String, i32)>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(err) => return err.into_response(),
    };
    let product = match require_product_id(&pairs) {
        Ok(product) => product,
        Err(err) => return err.into_response(),
    };

    let form = EditorForm::parse(kind, &pairs);
    match state
        .catalog()
        .update_content(product, content_id, locale, &form.payload())
        .await
    {
        Ok(()) => {
            state.catalog().invalidate_bundle(&slug).await;
            let jar = set_flash(jar, &Flash::success(format!("{} updated", kind.label())));
            (jar, Redirect::to(&format!("/products/{slug}"))).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, %kind, content_id, "content update rejected");
            let template = build_show(
                &state,
                locale,
                &slug,
                EditorState::Editing(kind, content_id),
                Some(form),
                Some(Flash::error(format!("Could not save: {err}"))),
                &jar,
            )
            .await;
            (jar, render(&template)).into_response()
        }
    }
}

/// Delete the whole entity: every locale's translation and its block.
#[instrument(skip(state, jar, pairs))]
pub async fn delete_entity(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path((slug, kind, content_id)): Path<(String, String, i32)>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(err) => return err.into_response(),
    };
    let product = match require_product_id(&pairs) {
        Ok(product) => product,
        Err(err) => return err.into_response(),
    };

    let flash = match state
        .catalog()
        .delete_content(product, kind, content_id, locale)
        .await
    {
        Ok(()) => {
            state.catalog().invalidate_bundle(&slug).await;
            Flash::success(format!("{} deleted (all languages)", kind.label()))
        }
        Err(err) => {
            tracing::warn!(error = %err, %kind, content_id, "content delete rejected");
            Flash::error(format!("Could not delete: {err}"))
        }
    };
    (set_flash(jar, &flash), Redirect::to(&format!("/products/{slug}"))).into_response()
}

/// Delete only the active locale's translation; the entity and every other
/// locale survive.
#[instrument(skip(state, jar, pairs))]
pub async fn delete_translation(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path((slug, kind, content_id)): Path<(String, String, i32)>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(err) => return err.into_response(),
    };
    let product = match require_product_id(&pairs) {
        Ok(product) => product,
        Err(err) => return err.into_response(),
    };

    let flash = match state
        .catalog()
        .delete_translation(product, kind, content_id, locale)
        .await
    {
        Ok(()) => {
            state.catalog().invalidate_bundle(&slug).await;
            Flash::success(format!(
                "Removed the {} translation of this {}",
                locale.native_name(),
                kind.label().to_lowercase()
            ))
        }
        Err(err) => {
            tracing::warn!(error = %err, %kind, content_id, "translation delete rejected");
            Flash::error(format!("Could not delete translation: {err}"))
        }
    };
    (set_flash(jar, &flash), Redirect::to(&format!("/products/{slug}"))).into_response()
}
