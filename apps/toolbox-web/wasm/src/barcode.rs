//! Barcode generator bindings
//!
//! Settings arrive as the generator form's plain object, e.g.
//! `{ content, format: "EAN13", moduleWidth: 2, height: 100, lineColor: "#000000" }`.
//! Missing fields take their defaults.

use barcode_core::{BarcodeSettings, ImageFormat, Symbology};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Entry for the format picker
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SymbologyOption {
    pub value: Symbology,
    pub label: String,
    pub description: &'static str,
    pub numeric: bool,
}

fn settings_from_js(settings: JsValue) -> Result<BarcodeSettings, JsValue> {
    serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid barcode settings: {}", e)))
}

fn parse_image_format(format: &str) -> Result<ImageFormat, String> {
    match format.trim().to_ascii_lowercase().as_str() {
        "png" => Ok(ImageFormat::Png),
        "svg" => Ok(ImageFormat::Svg),
        other => Err(format!("Unsupported image format: {}", other)),
    }
}

fn generate_png_internal(settings: &BarcodeSettings) -> Result<Vec<u8>, String> {
    barcode_core::render_png(settings).map_err(|e| format!("Barcode generation failed: {}", e))
}

fn generate_svg_internal(settings: &BarcodeSettings) -> Result<String, String> {
    barcode_core::render_svg(settings).map_err(|e| format!("Barcode generation failed: {}", e))
}

fn data_url_internal(settings: &BarcodeSettings, format: &str) -> Result<String, String> {
    let format = parse_image_format(format)?;
    barcode_core::to_data_url(settings, format)
        .map_err(|e| format!("Barcode generation failed: {}", e))
}

fn validate_internal(content: &str, format: &str) -> Result<String, String> {
    let symbology: Symbology = format.parse().map_err(|e| format!("{}", e))?;
    barcode_core::validate(content, symbology).map_err(|e| e.to_string())
}

fn symbology_options() -> Vec<SymbologyOption> {
    Symbology::ALL
        .iter()
        .map(|s| SymbologyOption {
            value: *s,
            label: s.to_string(),
            description: s.description(),
            numeric: s.is_numeric(),
        })
        .collect()
}

/// Render a PNG and return its bytes
#[wasm_bindgen]
pub fn generate_barcode_png(settings: JsValue) -> Result<js_sys::Uint8Array, JsValue> {
    let settings = settings_from_js(settings)?;
    let png = generate_png_internal(&settings).map_err(|e| JsValue::from_str(&e))?;
    Ok(js_sys::Uint8Array::from(png.as_slice()))
}

/// Render an SVG document
#[wasm_bindgen]
pub fn generate_barcode_svg(settings: JsValue) -> Result<String, JsValue> {
    let settings = settings_from_js(settings)?;
    generate_svg_internal(&settings).map_err(|e| JsValue::from_str(&e))
}

/// Render as a base64 `data:` URL (`"png"` or `"svg"`)
#[wasm_bindgen]
pub fn generate_barcode_data_url(settings: JsValue, format: &str) -> Result<String, JsValue> {
    let settings = settings_from_js(settings)?;
    data_url_internal(&settings, format).map_err(|e| JsValue::from_str(&e))
}

/// Object URL for a downloadable barcode image
#[wasm_bindgen]
pub fn create_barcode_download_url(settings: JsValue, format: &str) -> Result<String, JsValue> {
    let settings = settings_from_js(settings)?;
    match parse_image_format(format).map_err(|e| JsValue::from_str(&e))? {
        ImageFormat::Png => {
            let png = generate_png_internal(&settings).map_err(|e| JsValue::from_str(&e))?;
            crate::bytes_to_object_url(&png, ImageFormat::Png.mime_type())
        }
        ImageFormat::Svg => {
            let svg = generate_svg_internal(&settings).map_err(|e| JsValue::from_str(&e))?;
            crate::bytes_to_object_url(svg.as_bytes(), ImageFormat::Svg.mime_type())
        }
    }
}

/// Check content against a format.
/// Returns the text that will be printed (with check digit).
#[wasm_bindgen]
pub fn validate_barcode(content: &str, format: &str) -> Result<String, JsValue> {
    validate_internal(content, format).map_err(|e| JsValue::from_str(&e))
}

/// Supported formats for the picker
#[wasm_bindgen]
pub fn list_barcode_formats() -> Result<JsValue, JsValue> {
    crate::to_js(&symbology_options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_png_has_signature() {
        let settings = BarcodeSettings::new("HELLO-123", Symbology::Code128);
        let png = generate_png_internal(&settings).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_svg_contains_text() {
        let settings = BarcodeSettings::new("9638507", Symbology::Ean8);
        let svg = generate_svg_internal(&settings).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("96385074"));
    }

    #[test]
    fn test_data_url_formats() {
        let settings = BarcodeSettings::new("ABC", Symbology::Code39);
        assert!(data_url_internal(&settings, "png")
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert!(data_url_internal(&settings, "SVG")
            .unwrap()
            .starts_with("data:image/svg+xml;base64,"));
        assert!(data_url_internal(&settings, "gif").is_err());
    }

    #[test]
    fn test_generation_error_message() {
        let settings = BarcodeSettings::new("", Symbology::Code128);
        let err = generate_svg_internal(&settings).unwrap_err();
        assert!(err.starts_with("Barcode generation failed"));
    }

    #[test]
    fn test_validate_internal() {
        assert_eq!(validate_internal("400638133393", "EAN13").unwrap(), "4006381333931");
        assert!(validate_internal("4006381333932", "EAN13").is_err());
        assert!(validate_internal("123", "QR").is_err());
    }

    #[test]
    fn test_symbology_options_cover_all() {
        let options = symbology_options();
        assert_eq!(options.len(), Symbology::ALL.len());
        assert!(options.iter().any(|o| o.value == Symbology::Itf14 && o.numeric));
    }
}
