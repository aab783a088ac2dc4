//! Request-scoped context extraction.

pub mod locale;

pub use locale::CurrentLocale;
