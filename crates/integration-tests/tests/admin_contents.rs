//! Integration tests for admin content management.
//!
//! These tests require:
//! - A catalog API test tenant with at least one product (slug `test-product`)
//! - The admin server running (cargo run -p meridian-admin)
//!
//! Run with: cargo test -p meridian-integration-tests -- --ignored

use reqwest::{Client, StatusCode};

/// Base URL for the admin console (configurable via environment).
fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Slug of the seeded test product.
fn test_slug() -> String {
    std::env::var("TEST_PRODUCT_SLUG").unwrap_or_else(|_| "test-product".to_string())
}

/// Create a client that keeps cookies (locale choice, flash, layout draft).
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Switch the session's locale and assert the redirect.
async fn switch_locale(client: &Client, locale: &str, next: &str) {
    let resp = client
        .post(format!("{}/locale", admin_base_url()))
        .form(&[("locale", locale), ("next", next)])
        .send()
        .await
        .expect("Failed to switch locale");
    assert!(resp.status().is_redirection());
}

// ============================================================================
// Detail page & editor state
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and catalog API test tenant"]
async fn test_detail_page_renders_blocks() {
    let client = client();
    let resp = client
        .get(format!("{}/products/{}", admin_base_url(), test_slug()))
        .send()
        .await
        .expect("Failed to load detail page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Content blocks"));
}

#[tokio::test]
#[ignore = "Requires running admin server and catalog API test tenant"]
async fn test_only_one_editor_open_at_a_time() {
    let client = client();
    let base = admin_base_url();
    let slug = test_slug();

    // both query params present: exactly one editor form renders
    let resp = client
        .get(format!("{base}/products/{slug}?add=paragraph&edit=table:1"))
        .send()
        .await
        .expect("Failed to load detail page");
    let body = resp.text().await.expect("Failed to read response");
    assert_eq!(body.matches("id=\"editor\"").count(), 1);
    assert!(body.contains("Add paragraph"));
}

// ============================================================================
// Content CRUD
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and catalog API test tenant"]
async fn test_create_paragraph_appears_in_bundle() {
    let client = client();
    let base = admin_base_url();
    let slug = test_slug();
    switch_locale(&client, "en", &format!("/products/{slug}")).await;

    // the detail page carries the numeric product id in its forms
    let page = client
        .get(format!("{base}/products/{slug}"))
        .send()
        .await
        .expect("Failed to load detail page")
        .text()
        .await
        .expect("Failed to read page");
    let product_id = extract_product_id(&page).expect("product_id field on page");

    let resp = client
        .post(format!("{base}/products/{slug}/contents/paragraph"))
        .form(&[
            ("product_id", product_id.as_str()),
            ("title", "Durability"),
            ("subtitle", ""),
            ("full_text", "Built to last."),
            ("sort_order", "2"),
        ])
        .send()
        .await
        .expect("Failed to create paragraph");
    assert!(resp.status().is_redirection());

    // reload-after-write: the fresh bundle renders the new paragraph
    let page = client
        .get(format!("{base}/products/{slug}"))
        .send()
        .await
        .expect("Failed to reload detail page")
        .text()
        .await
        .expect("Failed to read page");
    assert!(page.contains("Durability"));
    assert!(page.contains("Built to last."));
}

#[tokio::test]
#[ignore = "Requires running admin server and catalog API test tenant"]
async fn test_delete_translation_preserves_other_locales() {
    let client = client();
    let base = admin_base_url();
    let slug = test_slug();

    // seed a paragraph with translations in two locales
    switch_locale(&client, "en", "/").await;
    let page = client
        .get(format!("{base}/products/{slug}"))
        .send()
        .await
        .expect("load")
        .text()
        .await
        .expect("read");
    let product_id = extract_product_id(&page).expect("product_id field on page");
    client
        .post(format!("{base}/products/{slug}/contents/paragraph"))
        .form(&[
            ("product_id", product_id.as_str()),
            ("title", "Locale isolation EN"),
            ("sort_order", "90"),
        ])
        .send()
        .await
        .expect("create en");

    let content_id =
        extract_edit_id(&load_page(&client, &slug).await, "paragraph").expect("new paragraph id");

    switch_locale(&client, "fr", "/").await;
    client
        .post(format!("{base}/products/{slug}/contents/paragraph/{content_id}"))
        .form(&[
            ("product_id", product_id.as_str()),
            ("title", "Isolation de locale FR"),
            ("sort_order", "90"),
        ])
        .send()
        .await
        .expect("create fr translation");

    // delete only the French translation
    client
        .post(format!(
            "{base}/products/{slug}/contents/paragraph/{content_id}/delete-translation"
        ))
        .form(&[("product_id", product_id.as_str())])
        .send()
        .await
        .expect("delete fr translation");

    // French now shows the explicit placeholder...
    let fr_page = load_page(&client, &slug).await;
    assert!(fr_page.contains("No translation for"));
    assert!(!fr_page.contains("Isolation de locale FR"));

    // ...and English is untouched
    switch_locale(&client, "en", "/").await;
    let en_page = load_page(&client, &slug).await;
    assert!(en_page.contains("Locale isolation EN"));
}

// ============================================================================
// Helpers
// ============================================================================

async fn load_page(client: &Client, slug: &str) -> String {
    client
        .get(format!("{}/products/{slug}", admin_base_url()))
        .send()
        .await
        .expect("Failed to load detail page")
        .text()
        .await
        .expect("Failed to read page")
}

/// Pull the hidden `product_id` field out of a rendered page.
fn extract_product_id(page: &str) -> Option<String> {
    let marker = "name=\"product_id\" value=\"";
    let start = page.find(marker)? + marker.len();
    let end = page[start..].find('"')? + start;
    Some(page[start..end].to_string())
}

/// Find the highest content id among edit links for a kind (the entity that
/// was just created).
fn extract_edit_id(page: &str, kind: &str) -> Option<i32> {
    let marker = format!("?edit={kind}:");
    page.match_indices(&marker)
        .filter_map(|(index, _)| {
            let rest = &page[index + marker.len()..];
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .max()
}
