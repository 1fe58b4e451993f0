//! Barcode generation
//!
//! Encodes content in a chosen symbology and renders it with the style
//! options of the generator page.
//!
//! ```
//! use barcode_core::{render_svg, BarcodeSettings, Symbology};
//!
//! let settings = BarcodeSettings::new("400638133393", Symbology::Ean13);
//! let svg = render_svg(&settings).unwrap();
//! assert!(svg.contains("4006381333931"));
//! ```

pub mod encode;
pub mod error;
mod font;
pub mod render;
pub mod symbology;

pub use encode::{encode, BarcodePattern};
pub use error::BarcodeError;
pub use render::{
    image_size, parse_hex_color, render_png, render_svg, to_data_url, BarcodeSettings,
    ImageFormat,
};
pub use symbology::Symbology;

/// Check that content can be encoded, returning the text that would be
/// printed (with any computed check digit)
pub fn validate(content: &str, symbology: Symbology) -> Result<String, BarcodeError> {
    encode(content, symbology).map(|pattern| pattern.text)
}
