//! Core types for Meridian.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod locale;
pub mod status;

pub use id::*;
pub use locale::{Locale, UnsupportedLocale};
pub use status::*;
