//! WASM bindings for the browser toolbox
//!
//! All computation happens in Rust; JavaScript only handles DOM events,
//! file input, clipboard and canvas drawing.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { RotateSession, generate_barcode_data_url, check_prime } from './pkg/toolbox_wasm.js';
//!
//! await init();
//!
//! // Rotate
//! const session = new RotateSession();
//! session.setProgressCallback((current, total, msg) => updateUI(current, total, msg));
//! const info = session.loadDocument("scan.pdf", bytes);
//! session.rotatePage(2, 90);
//! const url = session.createDownloadUrl();
//!
//! // Barcode
//! const dataUrl = generate_barcode_data_url({ content: "400638133393", format: "EAN13" }, "png");
//!
//! // Calculators
//! const result = check_prime(97);
//! ```

pub mod barcode;
pub mod calculators;
pub mod session;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use session::{FileInfo, PageView, RotateSession};

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Quick validation check for a PDF file
/// Returns Ok(()) if valid, Err with message if not
#[wasm_bindgen]
pub fn quick_validate(bytes: &[u8]) -> Result<(), JsValue> {
    pdfrotate_core::quick_validate(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get detailed PDF info without creating a session
#[wasm_bindgen]
pub fn get_pdf_info(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info =
        pdfrotate_core::validate_pdf(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&info)
}

/// Get page count from PDF bytes (convenience function)
#[wasm_bindgen]
pub fn get_page_count(bytes: &[u8]) -> Result<u32, JsValue> {
    let info =
        pdfrotate_core::validate_pdf(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(info.page_count)
}

/// Format bytes as human-readable string
#[wasm_bindgen]
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Serialize a record as a plain JS object (maps included, `None` as `null`)
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Wrap bytes in a Blob and return an object URL for it
pub(crate) fn bytes_to_object_url(bytes: &[u8], mime_type: &str) -> Result<String, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    web_sys::Url::create_object_url_with_blob(&blob)
}
