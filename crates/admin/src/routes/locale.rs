//! Locale switching.

use axum::response::{IntoResponse, Redirect};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use meridian_core::Locale;

use crate::middleware::locale::persist_locale;

/// Form posted by the locale switcher.
#[derive(Debug, Deserialize)]
pub struct LocaleForm {
    pub locale: String,
    pub next: Option<String>,
}

/// Switch and persist the active locale, then return to the posting page.
/// The UI only offers supported codes; anything else falls back to the
/// default rather than erroring.
pub async fn switch(jar: CookieJar, Form(form): Form<LocaleForm>) -> impl IntoResponse {
    let locale = Locale::parse_or_default(&form.locale);
    let jar = persist_locale(jar, locale);
    // only same-site paths; anything absolute is discarded
    let next = form
        .next
        .filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .unwrap_or_else(|| "/".to_string());
    (jar, Redirect::to(&next))
}
