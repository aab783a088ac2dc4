//! Route handlers and router assembly.

pub mod locale;
pub mod products;

use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;

use meridian_core::Locale;

use crate::state::AppState;

/// Build the site router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/locale", post(locale::switch))
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
}

async fn root() -> Redirect {
    Redirect::to("/products")
}

/// Data every page hands to the base layout.
pub struct Shell {
    pub locale: Locale,
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
    pub fn new(locale: Locale, next: impl Into<String>) -> Self {
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
            next: next.into(),
            locales,
        }
    }
}
