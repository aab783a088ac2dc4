//! Catalog API client.
//!
//! Thin REST client over `reqwest`. The locale rides along on every request
//! the transport layer sends - as a `locale` query parameter on GET/DELETE,
//! as the envelope field on POST/PUT bodies, and as a text part on multipart
//! uploads - so individual call sites never assemble it themselves.
//!
//! Bundles are optionally cached with `moka`. The public site runs with a
//! 5-minute TTL; the admin constructs the client without a cache so every
//! page load reflects server state (reload-after-write).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use meridian_core::{ImageGroupId, ImageId, Locale, ProductId};

use crate::convert::{convert_summary, normalize};
use crate::raw::{RawBundle, RawProductSummary};
use crate::types::{Bundle, ContentKind, ContentPayload, ProductPayload, ProductSummary};
use crate::CatalogError;

/// How long the public site may serve a cached bundle.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Connection settings for the catalog API.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the API, e.g. `https://catalog.meridianbp.example/api/v2`.
    pub base_url: Url,
    /// Bearer token; the admin's token is allowed to mutate.
    pub api_token: Option<SecretString>,
    /// Bundle cache TTL; `None` disables caching entirely.
    pub cache_ttl: Option<Duration>,
}

impl CatalogConfig {
    /// Config for the public site: read path, cached.
    #[must_use]
    pub fn cached(base_url: Url, api_token: Option<SecretString>) -> Self {
        Self {
            base_url,
            api_token,
            cache_ttl: Some(DEFAULT_CACHE_TTL),
        }
    }

    /// Config for the admin: uncached so reload-after-write sees server truth.
    #[must_use]
    pub fn uncached(base_url: Url, api_token: Option<SecretString>) -> Self {
        Self {
            base_url,
            api_token,
            cache_ttl: None,
        }
    }
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

/// Envelope for every mutating request body.
#[derive(Debug, Serialize)]
struct MutationBody<'a, T: Serialize> {
    locale: Locale,
    data: &'a T,
}

/// One file destined for an image group.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Client for the catalog REST API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    cache: Option<Cache<String, Arc<Bundle>>>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = config.cache_ttl.map(|ttl| {
            Cache::builder().max_capacity(1000).time_to_live(ttl).build()
        });

        Self {
            inner: Arc::new(CatalogClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                api_token: config
                    .api_token
                    .as_ref()
                    .map(|t| t.expose_secret().to_string()),
                cache,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.inner.http.request(method, self.endpoint(path));
        if let Some(token) = &self.inner.api_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and surface the response body, mapping non-success
    /// statuses to [`CatalogError`].
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, CatalogError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Read the body first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            // The API reports failures as {"message": "..."}; fall back to a
            // truncated raw body when it does not.
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            tracing::error!(status = %status, message = %message, "catalog API returned non-success status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        locale: Locale,
    ) -> Result<T, CatalogError> {
        let body = self
            .send(
                self.request(reqwest::Method::GET, path)
                    .query(&[("locale", locale.as_str())]),
            )
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete(&self, path: &str, locale: Locale) -> Result<(), CatalogError> {
        self.send(
            self.request(reqwest::Method::DELETE, path)
                .query(&[("locale", locale.as_str())]),
        )
        .await?;
        Ok(())
    }

    async fn send_body<T: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        locale: Locale,
        data: &T,
    ) -> Result<(), CatalogError> {
        self.send(
            self.request(method, path)
                .json(&MutationBody { locale, data }),
        )
        .await?;
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch one product's content bundle for one locale.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    /// A bundle that parses but is missing fields normalizes instead of
    /// erroring.
    #[instrument(skip(self), fields(slug = %slug, locale = %locale))]
    pub async fn get_bundle(&self, slug: &str, locale: Locale) -> Result<Bundle, CatalogError> {
        let cache_key = format!("bundle:{slug}:{locale}");

        if let Some(cache) = &self.inner.cache
            && let Some(bundle) = cache.get(&cache_key).await
        {
            debug!("cache hit for bundle");
            return Ok((*bundle).clone());
        }

        let raw: RawBundle = self
            .get_json(&format!("products/{slug}"), locale)
            .await
            .map_err(|err| match err {
                CatalogError::Status { status: 404, .. } => {
                    CatalogError::NotFound(format!("product not found: {slug}"))
                }
                other => other,
            })?;

        let bundle = normalize(raw, locale);

        if let Some(cache) = &self.inner.cache {
            cache.insert(cache_key, Arc::new(bundle.clone())).await;
        }

        Ok(bundle)
    }

    /// List products for the index pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(locale = %locale))]
    pub async fn list_products(&self, locale: Locale) -> Result<Vec<ProductSummary>, CatalogError> {
        let raw: Vec<RawProductSummary> = self.get_json("products", locale).await?;
        Ok(raw.into_iter().filter_map(convert_summary).collect())
    }

    /// Create a product's base info.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request fails.
    #[instrument(skip(self, payload), fields(locale = %locale))]
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
        locale: Locale,
    ) -> Result<(), CatalogError> {
        self.send_body(reqwest::Method::POST, "products", locale, payload)
            .await
    }

    /// Partially update a product's base info.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request fails.
    #[instrument(skip(self, payload), fields(product = %product, locale = %locale))]
    pub async fn update_product(
        &self,
        product: ProductId,
        payload: &ProductPayload,
        locale: Locale,
    ) -> Result<(), CatalogError> {
        self.send_body(
            reqwest::Method::PUT,
            &format!("products/{product}"),
            locale,
            payload,
        )
        .await
    }

    // =========================================================================
    // Content entities
    // =========================================================================

    /// Create a content entity, its translation for `locale`, and its layout
    /// block (server side).
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request fails.
    #[instrument(skip(self, payload), fields(product = %product, kind = %payload.kind(), locale = %locale))]
    pub async fn create_content(
        &self,
        product: ProductId,
        locale: Locale,
        payload: &ContentPayload,
    ) -> Result<(), CatalogError> {
        self.send_body(
            reqwest::Method::POST,
            &format!("products/{product}/contents/{}", payload.kind().path_segment()),
            locale,
            payload,
        )
        .await
    }

    /// Upsert the translation for `locale` on an existing content entity.
    /// Other locales' translations are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request fails.
    #[instrument(skip(self, payload), fields(product = %product, content_id, locale = %locale))]
    pub async fn update_content(
        &self,
        product: ProductId,
        content_id: i32,
        locale: Locale,
        payload: &ContentPayload,
    ) -> Result<(), CatalogError> {
        self.send_body(
            reqwest::Method::PUT,
            &format!(
                "products/{product}/contents/{}/{content_id}",
                payload.kind().path_segment()
            ),
            locale,
            payload,
        )
        .await
    }

    /// Delete an entire content entity: every locale's translation and the
    /// entity's layout block.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %product, kind = %kind, content_id, locale = %locale))]
    pub async fn delete_content(
        &self,
        product: ProductId,
        kind: ContentKind,
        content_id: i32,
        locale: Locale,
    ) -> Result<(), CatalogError> {
        self.delete(
            &format!("products/{product}/contents/{}/{content_id}", kind.path_segment()),
            locale,
        )
        .await
    }

    /// Delete only one locale's translation; the entity and every other
    /// locale's translation survive.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %product, kind = %kind, content_id, locale = %locale))]
    pub async fn delete_translation(
        &self,
        product: ProductId,
        kind: ContentKind,
        content_id: i32,
        locale: Locale,
    ) -> Result<(), CatalogError> {
        self.delete(
            &format!(
                "products/{product}/contents/{}/{content_id}/{locale}",
                kind.path_segment()
            ),
            locale,
        )
        .await
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Create a named image group on a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the payload or the request fails.
    #[instrument(skip(self), fields(product = %product, locale = %locale))]
    pub async fn create_image_group(
        &self,
        product: ProductId,
        name: &str,
        locale: Locale,
    ) -> Result<(), CatalogError> {
        #[derive(Serialize)]
        struct GroupBody<'a> {
            name: &'a str,
        }
        self.send_body(
            reqwest::Method::POST,
            &format!("products/{product}/image-groups"),
            locale,
            &GroupBody { name },
        )
        .await
    }

    /// Upload images into an existing group (multipart).
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is rejected or the request fails.
    #[instrument(skip(self, files), fields(product = %product, group = %group, count = files.len()))]
    pub async fn upload_images(
        &self,
        product: ProductId,
        group: ImageGroupId,
        files: Vec<ImageUpload>,
        locale: Locale,
    ) -> Result<(), CatalogError> {
        let mut form = reqwest::multipart::Form::new()
            .text("locale", locale.as_str())
            .text("group_id", group.to_string());
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.filename)
                .mime_str(&file.content_type)
                .map_err(CatalogError::Http)?;
            form = form.part("files[]", part);
        }

        self.send(
            self.request(reqwest::Method::POST, &format!("products/{product}/images"))
                .multipart(form),
        )
        .await?;
        Ok(())
    }

    /// Remove a single image.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %product, image = %image))]
    pub async fn delete_image(
        &self,
        product: ProductId,
        image: ImageId,
        locale: Locale,
    ) -> Result<(), CatalogError> {
        self.delete(&format!("products/{product}/images/{image}"), locale)
            .await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate the cached bundle for a slug, across every locale.
    pub async fn invalidate_bundle(&self, slug: &str) {
        if let Some(cache) = &self.inner.cache {
            for locale in Locale::ALL {
                cache.invalidate(&format!("bundle:{slug}:{locale}")).await;
            }
        }
    }
}

#[derive(serde::Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParagraphPayload;

    #[test]
    fn test_mutation_envelope_shape() {
        // The exact body the paragraphs endpoint receives on create
        let payload = ContentPayload::Paragraph(ParagraphPayload {
            title: Some("Durability".to_string()),
            subtitle: None,
            full_text: Some("Built to last.".to_string()),
            sort_order: 2,
        });
        let body = MutationBody {
            locale: Locale::En,
            data: &payload,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "locale": "en",
                "data": {
                    "title": "Durability",
                    "full_text": "Built to last.",
                    "sort_order": 2,
                },
            })
        );
    }

    #[test]
    fn test_endpoint_join_tolerates_trailing_slash() {
        let config = CatalogConfig::uncached(
            Url::parse("https://catalog.example/api/v2/").expect("url"),
            None,
        );
        let client = CatalogClient::new(&config);
        assert_eq!(
            client.endpoint("products/thermal-brick-200"),
            "https://catalog.example/api/v2/products/thermal-brick-200"
        );
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = CatalogConfig::cached(
            Url::parse("https://catalog.example/api/v2").expect("url"),
            Some(SecretString::from("super-secret-token")),
        );
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
