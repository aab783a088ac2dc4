//! Supported locales.
//!
//! Meridian publishes catalog content in a fixed set of languages. Exactly one
//! locale is active per request; it selects which translation of each content
//! item the catalog API returns and whether the page renders left-to-right or
//! right-to-left.
//!
//! Unsupported codes never error: parsing falls back to [`Locale::DEFAULT`],
//! so a stale or hand-edited locale cookie degrades to English instead of
//! breaking the page.

use serde::{Deserialize, Serialize};

/// A supported content locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// French.
    Fr,
    /// German.
    De,
    /// Arabic (right-to-left).
    Ar,
    /// Simplified Chinese.
    Zh,
}

impl Locale {
    /// The fallback locale used when a code is missing or unsupported.
    pub const DEFAULT: Self = Self::En;

    /// All supported locales, in switcher display order.
    pub const ALL: [Self; 5] = [Self::En, Self::Fr, Self::De, Self::Ar, Self::Zh];

    /// The ISO 639-1 code sent to the catalog API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Ar => "ar",
            Self::Zh => "zh",
        }
    }

    /// Language name in its own language, for the locale switcher.
    #[must_use]
    pub const fn native_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "Français",
            Self::De => "Deutsch",
            Self::Ar => "العربية",
            Self::Zh => "中文",
        }
    }

    /// Whether pages in this locale render right-to-left.
    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        matches!(self, Self::Ar)
    }

    /// The `dir` attribute value for the root element.
    #[must_use]
    pub const fn text_direction(&self) -> &'static str {
        if self.is_rtl() { "rtl" } else { "ltr" }
    }

    /// Parse a locale code, falling back to [`Self::DEFAULT`] when the code is
    /// not in the supported set.
    #[must_use]
    pub fn parse_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::DEFAULT)
    }

    /// Parse a locale code strictly.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            "de" => Some(Self::De),
            "ar" => Some(Self::Ar),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// Error returned when strictly parsing a locale code that is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_codes() {
        for locale in Locale::ALL {
            assert_eq!(Locale::parse_or_default(locale.as_str()), locale);
        }
        // case and whitespace tolerance
        assert_eq!(Locale::parse_or_default(" AR "), Locale::Ar);
    }

    #[test]
    fn test_unsupported_falls_back_to_default() {
        assert_eq!(Locale::parse_or_default("pt"), Locale::En);
        assert_eq!(Locale::parse_or_default(""), Locale::En);
        assert!("pt".parse::<Locale>().is_err());
    }

    #[test]
    fn test_text_direction() {
        assert!(Locale::Ar.is_rtl());
        assert_eq!(Locale::Ar.text_direction(), "rtl");
        for locale in [Locale::En, Locale::Fr, Locale::De, Locale::Zh] {
            assert_eq!(locale.text_direction(), "ltr");
        }
    }

    #[test]
    fn test_serde_uses_code() {
        let locale: Locale = serde_json::from_str("\"zh\"").expect("code");
        assert_eq!(locale, Locale::Zh);
        assert_eq!(serde_json::to_string(&Locale::Ar).expect("serialize"), "\"ar\"");
    }
}
