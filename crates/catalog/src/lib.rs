//! Catalog API client and content bundle model.
//!
//! # Architecture
//!
//! - The catalog API is the source of truth - NO local sync, direct REST calls
//! - Both front-ends consume the same normalized [`types::Bundle`] snapshot
//! - In-memory caching via `moka` for the public site (5 minute TTL); the
//!   admin runs uncached so every page reflects server state
//!
//! # Layers
//!
//! - [`raw`] - loosely-typed wire DTOs exactly as the API returns them
//! - [`convert`] - the normalizer that turns a raw bundle into a [`types::Bundle`]
//! - [`layout`] - block ordering with a staged, uncommitted reorder draft
//! - [`client`] - the HTTP client; injects the locale into every request
//!
//! # Example
//!
//! ```rust,ignore
//! use meridian_catalog::{CatalogClient, CatalogConfig};
//! use meridian_core::Locale;
//!
//! let client = CatalogClient::new(&config);
//!
//! // Fetch one product's content snapshot for one locale
//! let bundle = client.get_bundle("thermal-brick-200", Locale::En).await?;
//! for block in bundle.layout.blocks {
//!     // render block...
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod convert;
pub mod layout;
pub mod raw;
pub mod types;

pub use client::{CatalogClient, CatalogConfig, ImageUpload};
pub use layout::{Direction, LayoutOrdering};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the API error body, or a truncated raw body.
        message: String,
    },

    /// JSON parsing of a response body failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl CatalogError {
    /// Whether the failure is the caller's input rather than infrastructure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 400 && *status < 500,
            Self::NotFound(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::NotFound("thermal-brick-200".to_string());
        assert_eq!(err.to_string(), "Not found: thermal-brick-200");

        let err = CatalogError::Status {
            status: 422,
            message: "title is required".to_string(),
        };
        assert_eq!(err.to_string(), "API error (422): title is required");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(
            CatalogError::Status {
                status: 422,
                message: String::new()
            }
            .is_client_error()
        );
        assert!(
            !CatalogError::Status {
                status: 502,
                message: String::new()
            }
            .is_client_error()
        );
        assert!(CatalogError::NotFound(String::new()).is_client_error());
    }
}
