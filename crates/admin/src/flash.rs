//! One-shot flash notifications carried in a cookie.
//!
//! Mutation handlers redirect after success; the outcome message survives the
//! redirect in a short-lived cookie that the next page render consumes and
//! clears. The message text is percent-encoded so it stays cookie-safe.

use axum_extra::extract::cookie::{Cookie, CookieJar};

const FLASH_COOKIE: &str = "meridian_admin_flash";

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// CSS class suffix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A notification to show on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Queue a flash message for the next page load.
#[must_use]
pub fn set_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    let value = format!(
        "{}:{}",
        flash.level.as_str(),
        urlencoding::encode(&flash.message)
    );
    let cookie = Cookie::build((FLASH_COOKIE, value)).path("/").http_only(true);
    jar.add(cookie)
}

/// Consume the pending flash message, clearing the cookie.
#[must_use]
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = parse_flash(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash)
}

fn parse_flash(value: &str) -> Option<Flash> {
    let (level, encoded) = value.split_once(':')?;
    let level = match level {
        "success" => FlashLevel::Success,
        "error" => FlashLevel::Error,
        _ => return None,
    };
    let message = urlencoding::decode(encoded).ok()?.into_owned();
    Some(Flash { level, message })
}
