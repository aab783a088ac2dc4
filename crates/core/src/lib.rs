//! Meridian Core - Shared types library.
//!
//! This crate provides common types used across all Meridian components:
//! - `site` - Public marketing/catalog site
//! - `admin` - Internal content-management console
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, supported locales, and product status/kind enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
