//! Object URLs and browser-triggered downloads for binary CSV results.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

use crate::types::AppError;

/// Read a browser [`File`] as text.
pub async fn read_file_text(file: &File) -> Result<String, AppError> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| AppError::Remote(format!("Failed to read file: {:?}", e)))?;
    Ok(text.as_string().unwrap_or_default())
}

/// Build a `text/csv` blob from raw CSV text (for multipart upload).
pub fn csv_blob(text: &str) -> Result<Blob, AppError> {
    let parts = Array::of1(&text.into());
    let options = BlobPropertyBag::new();
    options.set_type("text/csv");
    Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Remote(format!("Failed to create blob: {:?}", e)))
}

/// Build a blob from raw bytes.
pub fn bytes_blob(bytes: &[u8], mime: &str) -> Result<Blob, AppError> {
    let array = Uint8Array::from(bytes);
    let parts = Array::of1(&array.into());
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Remote(format!("Failed to create blob: {:?}", e)))
}

/// Mint an object URL for raw bytes. The caller owns the URL's lifetime.
pub fn object_url(bytes: &[u8], mime: &str) -> Result<String, AppError> {
    let blob = bytes_blob(bytes, mime)?;
    Url::create_object_url_with_blob(&blob)
        .map_err(|e| AppError::Remote(format!("Failed to create object URL: {:?}", e)))
}

/// Trigger a browser download of `bytes` as `filename` via a transient
/// anchor element.
pub fn trigger_download(bytes: &[u8], filename: &str) -> Result<(), AppError> {
    let url = object_url(bytes, "text/csv")?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Remote("No document available".to_string()))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| AppError::Remote(format!("Failed to create anchor: {:?}", e)))?
        .dyn_into()
        .map_err(|_| AppError::Remote("Element is not an anchor".to_string()))?;

    anchor.set_href(&url);
    anchor.set_download(filename);

    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
        anchor.click();
        let _ = body.remove_child(&anchor);
    }

    let _ = Url::revoke_object_url(&url);
    Ok(())
}
