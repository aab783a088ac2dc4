//! Integration tests for the Meridian web front-ends.
//!
//! # Running Tests
//!
//! ```bash
//! # Start both binaries against a catalog API test tenant
//! cargo run -p meridian-admin &
//! cargo run -p meridian-site &
//!
//! # Run integration tests
//! cargo test -p meridian-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `admin_contents` - Content CRUD and locale isolation through the admin
//! - `site_products` - Public catalog rendering and locale switching
//!
//! Base URLs are configurable via `ADMIN_BASE_URL` and `SITE_BASE_URL`.
