//! The current-locale context.
//!
//! The active locale is request state, not a global: handlers receive it via
//! the [`CurrentLocale`] extractor and pass it explicitly to the catalog
//! client and the templates. Persistence is a plain long-lived cookie written
//! by the locale switch handler; an unsupported or missing cookie value falls
//! back to the default locale instead of erroring.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use meridian_core::Locale;

/// Cookie that persists the admin's language choice across sessions.
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
        // survives browser restarts; the choice must outlive the session
        .permanent();
    jar.add(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cookie_defaults() {
        assert_eq!(locale_from_jar(&CookieJar::new()), Locale::DEFAULT);
    }

    #[test]
    fn test_persisted_locale_round_trip() {
        let jar = persist_locale(CookieJar::new(), Locale::Ar);
        assert_eq!(locale_from_jar(&jar), Locale::Ar);
    }

    #[test]
    fn test_tampered_cookie_falls_back() {
        let jar = CookieJar::new().add(Cookie::new(LOCALE_COOKIE, "klingon"));
        assert_eq!(locale_from_jar(&jar), Locale::DEFAULT);
    }
}
