//! Layout reordering handlers.
//!
//! Moves are staged in a per-product cookie as a `(block_id, sort_order)`
//! diff against the server's sequence, so the admin can line up several moves
//! before deciding. The diff is rebuilt against a fresh bundle on every
//! request; stale entries for blocks the server no longer has are dropped.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::instrument;

use meridian_catalog::{Direction, LayoutOrdering};
use meridian_core::BlockId;

use crate::flash::{set_flash, Flash};
use crate::middleware::CurrentLocale;
use crate::state::AppState;

const DRAFT_COOKIE_PREFIX: &str = "meridian_admin_layout_";

fn draft_cookie_name(slug: &str) -> String {
    format!("{DRAFT_COOKIE_PREFIX}{slug}")
}

/// Read the staged reorder diff for a product, if any.
#[must_use]
pub fn read_draft(jar: &CookieJar, slug: &str) -> Vec<(BlockId, i32)> {
    jar.get(&draft_cookie_name(slug))
        .and_then(|cookie| {
            let decoded = urlencoding::decode(cookie.value()).ok()?;
            serde_json::from_str::<Vec<(i32, i32)>>(&decoded).ok()
        })
        .map(|entries| {
            entries
                .into_iter()
                .map(|(id, sort_order)| (BlockId::new(id), sort_order))
                .collect()
        })
        .unwrap_or_default()
}

/// Persist the staged diff; an empty diff clears the cookie.
#[must_use]
fn write_draft(jar: CookieJar, slug: &str, overrides: &[(BlockId, i32)]) -> CookieJar {
    let name = draft_cookie_name(slug);
    if overrides.is_empty() {
        return jar.remove(Cookie::build(name).path("/"));
    }
    let entries: Vec<(i32, i32)> = overrides
        .iter()
        .map(|(id, sort_order)| (id.as_i32(), *sort_order))
        .collect();
    let json = serde_json::to_string(&entries).unwrap_or_default();
    let cookie = Cookie::build((name, urlencoding::encode(&json).into_owned()))
        .path("/")
        .http_only(true);
    jar.add(cookie)
}

/// Form posted by the per-block move buttons.
#[derive(Debug, Deserialize)]
pub struct MoveForm {
    pub block_id: i32,
    pub direction: String,
}

/// Stage an adjacent swap into the draft.
#[instrument(skip(state, jar))]
pub async fn move_block(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(slug): Path<String>,
    jar: CookieJar,
    Form(form): Form<MoveForm>,
) -> Response {
    let Ok(direction) = form.direction.parse::<Direction>() else {
        return crate::error::AppError::BadRequest(format!(
            "invalid direction: {}",
            form.direction
        ))
        .into_response();
    };

    match state.catalog().get_bundle(&slug, locale).await {
        Ok(bundle) => {
            let mut ordering = LayoutOrdering::new(bundle.layout.blocks);
            ordering.apply_overrides(&read_draft(&jar, &slug));
            // edge moves are silent no-ops
            ordering.move_block(BlockId::new(form.block_id), direction);
            let jar = write_draft(jar, &slug, &ordering.overrides());
            (jar, Redirect::to(&format!("/products/{slug}"))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, slug, "failed to load bundle for reorder");
            let jar = set_flash(
                jar,
                &Flash::error("Failed to load content from the catalog service"),
            );
            (jar, Redirect::to(&format!("/products/{slug}"))).into_response()
        }
    }
}

/// Discard the staged draft.
pub async fn reset(Path(slug): Path<String>, jar: CookieJar) -> Response {
    let jar = write_draft(jar, &slug, &[]);
    let jar = set_flash(jar, &Flash::success("Discarded staged order changes"));
    (jar, Redirect::to(&format!("/products/{slug}"))).into_response()
}

/// The save action for staged order changes.
///
/// TODO: wire this to the catalog API once it exposes a layout reorder
/// endpoint; until then the staged order lives only in this browser.
pub async fn save(Path(slug): Path<String>, jar: CookieJar) -> Response {
    let staged = read_draft(&jar, &slug);
    let flash = if staged.is_empty() {
        Flash::success("Block order is unchanged")
    } else {
        Flash::error(
            "The catalog service does not accept layout reorders yet; \
             your staged order is kept in this browser",
        )
    };
    (set_flash(jar, &flash), Redirect::to(&format!("/products/{slug}"))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_cookie_round_trip() {
        let overrides = vec![(BlockId::new(4), 2), (BlockId::new(7), 1)];
        let jar = write_draft(CookieJar::new(), "thermal-brick-200", &overrides);
        assert_eq!(read_draft(&jar, "thermal-brick-200"), overrides);
        // drafts are per product
        assert!(read_draft(&jar, "other-product").is_empty());
    }

    #[test]
    fn test_empty_draft_clears_cookie() {
        let jar = write_draft(CookieJar::new(), "p", &[(BlockId::new(1), 0)]);
        let jar = write_draft(jar, "p", &[]);
        assert!(read_draft(&jar, "p").is_empty());
    }

    #[test]
    fn test_garbage_cookie_reads_empty() {
        let jar = CookieJar::new().add(Cookie::new(draft_cookie_name("p"), "not json"));
        assert!(read_draft(&jar, "p").is_empty());
    }
}
