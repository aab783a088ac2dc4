//! The current-locale context for the public site.
//!
//! Same contract as the admin console: the locale is request state extracted
//! from a persisted cookie, passed explicitly to the catalog client and the
//! templates, and mirrored onto the root element's `dir` attribute for
//! right-to-left languages.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use meridian_core::Locale;

/// Cookie that persists the visitor's language choice.
pub const LOCALE_COOKIE: &str = "meridian_locale";

/// Extractor for the request's active locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentLocale(pub Locale);

impl<S: Send + Sync> FromRequestParts<S> for CurrentLocale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(locale_from_jar(&jar)))
    }
}

/// Read the persisted locale from a cookie jar, falling back to the default.
#[must_use]
pub fn locale_from_jar(jar: &CookieJar) -> Locale {
    jar.get(LOCALE_COOKIE)
        .map(|cookie| Locale::parse_or_default(cookie.value()))
        .unwrap_or_default()
}

/// Persist a locale choice.
#[must_use]
pub fn persist_locale(jar: CookieJar, locale: Locale) -> CookieJar {
    let cookie = Cookie::build((LOCALE_COOKIE, locale.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .permanent();
    jar.add(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_round_trip_and_fallback() {
        assert_eq!(locale_from_jar(&CookieJar::new()), Locale::DEFAULT);
        let jar = persist_locale(CookieJar::new(), Locale::Zh);
        assert_eq!(locale_from_jar(&jar), Locale::Zh);
        let jar = CookieJar::new().add(Cookie::new(LOCALE_COOKIE, "xx"));
        assert_eq!(locale_from_jar(&jar), Locale::DEFAULT);
    }
}
