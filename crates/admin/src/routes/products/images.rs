//! Image group and image handlers.

use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use meridian_catalog::ImageUpload;
use meridian_core::{ImageGroupId, ImageId, ProductId};

use crate::flash::{set_flash, Flash};
use crate::middleware::CurrentLocale;
use crate::state::AppState;

use super::forms;

/// Create a named image group.
#[instrument(skip(state, jar, pairs))]
pub async fn create_group(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(slug): Path<String>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let Some(product) = forms::product_id(&pairs).map(ProductId::new) else {
        return crate::error::AppError::BadRequest("missing product id".to_string())
            .into_response();
    };
    let name = pairs
        .iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.trim())
        .unwrap_or_default();

    let flash = if name.is_empty() {
        Flash::error("Give the image group a name")
    } else {
        match state.catalog().create_image_group(product, name, locale).await {
            Ok(()) => {
                state.catalog().invalidate_bundle(&slug).await;
                Flash::success("Image group created")
            }
            Err(err) => {
                tracing::warn!(error = %err, "image group create rejected");
                Flash::error(format!("Could not create image group: {err}"))
            }
        }
    };
    (set_flash(jar, &flash), Redirect::to(&format!("/products/{slug}"))).into_response()
}

/// Upload images into an existing group.
#[instrument(skip(state, jar, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(slug): Path<String>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Response {
    let mut product: Option<ProductId> = None;
    let mut group: Option<ImageGroupId> = None;
    let mut files: Vec<ImageUpload> = Vec::new();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => match field.name().map(ToString::to_string).as_deref() {
                Some("product_id") => {
                    product = field
                        .text()
                        .await
                        .ok()
                        .and_then(|v| v.trim().parse().ok())
                        .map(ProductId::new);
                }
                Some("group_id") => {
                    group = field
                        .text()
                        .await
                        .ok()
                        .and_then(|v| v.trim().parse().ok())
                        .map(ImageGroupId::new);
                }
                Some("files") => {
                    let filename = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    match field.bytes().await {
                        Ok(bytes) if !bytes.is_empty() => files.push(ImageUpload {
                            filename,
                            content_type,
                            bytes: bytes.to_vec(),
                        }),
                        Ok(_) => {} // empty file input submitted untouched
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to read uploaded file");
                        }
                    }
                }
                _ => {}
            },
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(error = %err, "malformed multipart upload");
                let jar = set_flash(jar, &Flash::error("Upload failed: malformed request"));
                return (jar, Redirect::to(&format!("/products/{slug}"))).into_response();
            }
        }
    }

    let flash = match (product, group, files.is_empty()) {
        (Some(product), Some(group), false) => {
            let count = files.len();
            match state
                .catalog()
                .upload_images(product, group, files, locale)
                .await
            {
                Ok(()) => {
                    state.catalog().invalidate_bundle(&slug).await;
                    Flash::success(format!("Uploaded {count} image(s)"))
                }
                Err(err) => {
                    tracing::warn!(error = %err, "image upload rejected");
                    Flash::error(format!("Could not upload images: {err}"))
                }
            }
        }
        (_, _, true) => Flash::error("Choose at least one file to upload"),
        _ => Flash::error("Upload failed: missing product or group"),
    };
    (set_flash(jar, &flash), Redirect::to(&format!("/products/{slug}"))).into_response()
}

/// Remove a single image.
#[instrument(skip(state, jar, pairs))]
pub async fn delete(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path((slug, image_id)): Path<(String, i32)>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let Some(product) = forms::product_id(&pairs).map(ProductId::new) else {
        return crate::error::AppError::BadRequest("missing product id".to_string())
            .into_response();
    };

    let flash = match state
        .catalog()
        .delete_image(product, ImageId::new(image_id), locale)
        .await
    {
        Ok(()) => {
            state.catalog().invalidate_bundle(&slug).await;
            Flash::success("Image removed")
        }
        Err(err) => {
            tracing::warn!(error = %err, image_id, "image delete rejected");
            Flash::error(format!("Could not remove image: {err}"))
        }
    };
    (set_flash(jar, &flash), Redirect::to(&format!("/products/{slug}"))).into_response()
}
