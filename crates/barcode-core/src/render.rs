//! Barcode rendering
//!
//! Raster (PNG) and vector (SVG) output from a [`BarcodeSettings`] record,
//! plus `data:` URLs for the copy/download/share actions.

use crate::encode::{encode, BarcodePattern};
use crate::error::BarcodeError;
use crate::font;
use crate::symbology::Symbology;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Longest content accepted for any symbology
pub const MAX_CONTENT_LEN: usize = 256;
/// Widest image rendered, in pixels
pub const MAX_IMAGE_WIDTH: u32 = 8192;

/// Everything the generator form collects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarcodeSettings {
    pub content: String,
    pub format: Symbology,
    /// Pixels per module
    pub module_width: u32,
    /// Bar height in pixels
    pub height: u32,
    /// Quiet zone around the symbol in pixels
    pub margin: u32,
    /// Print the content under the bars
    pub display_value: bool,
    pub font_size: u32,
    /// Gap between bars and text
    pub text_margin: u32,
    pub line_color: String,
    pub background: String,
}

impl Default for BarcodeSettings {
    fn default() -> Self {
        Self {
            content: String::new(),
            format: Symbology::Code128,
            module_width: 2,
            height: 100,
            margin: 10,
            display_value: true,
            font_size: 20,
            text_margin: 2,
            line_color: "#000000".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

impl BarcodeSettings {
    pub fn new(content: impl Into<String>, format: Symbology) -> Self {
        Self {
            content: content.into(),
            format,
            ..Self::default()
        }
    }

    /// Check geometry and colours; content is checked by the encoder
    pub fn validate(&self) -> Result<(), BarcodeError> {
        let content_len = self.content.chars().count();
        if content_len > MAX_CONTENT_LEN {
            return Err(BarcodeError::InvalidSettings(format!(
                "content must be at most {} characters, got {}",
                MAX_CONTENT_LEN, content_len
            )));
        }
        if !(1..=4).contains(&self.module_width) {
            return Err(BarcodeError::InvalidSettings(format!(
                "module width must be 1-4, got {}",
                self.module_width
            )));
        }
        if !(1..=1000).contains(&self.height) {
            return Err(BarcodeError::InvalidSettings(format!(
                "height must be 1-1000, got {}",
                self.height
            )));
        }
        if self.margin > 200 {
            return Err(BarcodeError::InvalidSettings(format!(
                "margin must be at most 200, got {}",
                self.margin
            )));
        }
        if self.display_value && !(1..=100).contains(&self.font_size) {
            return Err(BarcodeError::InvalidSettings(format!(
                "font size must be 1-100, got {}",
                self.font_size
            )));
        }
        if self.text_margin > 100 {
            return Err(BarcodeError::InvalidSettings(format!(
                "text margin must be at most 100, got {}",
                self.text_margin
            )));
        }
        parse_hex_color(&self.line_color)?;
        parse_hex_color(&self.background)?;
        Ok(())
    }
}

/// Parse `#RRGGBB` or `#RGB` into bytes
pub fn parse_hex_color(color: &str) -> Result<[u8; 3], BarcodeError> {
    let hex = color.trim().trim_start_matches('#');
    let invalid = || BarcodeError::InvalidColor(color.to_string());

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Ok([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|v| v * 17)
                    .map_err(|_| invalid())
            };
            Ok([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => Err(invalid()),
    }
}

/// Encode the settings' content and check the settings
fn prepare(settings: &BarcodeSettings) -> Result<BarcodePattern, BarcodeError> {
    settings.validate()?;
    encode(&settings.content, settings.format)
}

/// Rendered image size in pixels for a pattern, caption included
pub fn image_size(
    pattern: &BarcodePattern,
    settings: &BarcodeSettings,
) -> Result<(u32, u32), BarcodeError> {
    let too_large = || {
        BarcodeError::InvalidSettings(format!(
            "image would be wider than {} pixels",
            MAX_IMAGE_WIDTH
        ))
    };

    let width = u32::try_from(pattern.width())
        .ok()
        .and_then(|modules| modules.checked_mul(settings.module_width))
        .and_then(|bars| bars.checked_add(settings.margin.checked_mul(2)?))
        .filter(|width| *width <= MAX_IMAGE_WIDTH)
        .ok_or_else(too_large)?;

    let mut height = settings.height + 2 * settings.margin;
    if settings.display_value {
        height += settings.text_margin + settings.font_size;
    }
    Ok((width, height))
}

/// Render bars and the optional caption to an RGB PNG
pub fn render_png(settings: &BarcodeSettings) -> Result<Vec<u8>, BarcodeError> {
    let pattern = prepare(settings)?;
    let line = parse_hex_color(&settings.line_color)?;
    let background = parse_hex_color(&settings.background)?;
    let (width, height) = image_size(&pattern, settings)?;

    // One row, then repeated for every bar row
    let mut row = Vec::with_capacity(width as usize * 3);
    let margin = std::iter::repeat(background).take(settings.margin as usize);
    row.extend(margin.clone().flatten());
    for &bar in &pattern.modules {
        let color = if bar { line } else { background };
        for _ in 0..settings.module_width {
            row.extend_from_slice(&color);
        }
    }
    row.extend(margin.flatten());

    let blank: Vec<u8> = std::iter::repeat(background)
        .take(width as usize)
        .flatten()
        .collect();

    let mut pixels = Vec::with_capacity(row.len() * height as usize);
    for y in 0..height {
        let in_bars = y >= settings.margin && y < settings.margin + settings.height;
        pixels.extend_from_slice(if in_bars { &row } else { &blank });
    }

    if settings.display_value {
        draw_caption(&mut pixels, width, height, &pattern.text, settings, line);
    }

    let mut output = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut output, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| BarcodeError::Encoding(e.to_string()))?;
        writer
            .write_image_data(&pixels)
            .map_err(|e| BarcodeError::Encoding(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| BarcodeError::Encoding(e.to_string()))?;
    }

    tracing::debug!(width, height, bytes = output.len(), "rendered barcode PNG");

    Ok(output)
}

/// Paint `text` centred in the caption band below the bars.
/// Pixels falling outside the image are dropped.
fn draw_caption(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    text: &str,
    settings: &BarcodeSettings,
    color: [u8; 3],
) {
    let scale = font::scale_for(settings.font_size);
    let band_top = settings.margin + settings.height + settings.text_margin;
    let top = band_top + settings.font_size.saturating_sub(font::GLYPH_HEIGHT * scale) / 2;
    let left = width.saturating_sub(font::text_width(text, scale)) / 2;

    for (i, c) in text.chars().enumerate() {
        let glyph = font::glyph(c);
        let origin = left + i as u32 * font::ADVANCE * scale;
        for row in 0..font::GLYPH_HEIGHT {
            for col in 0..font::GLYPH_WIDTH {
                if !font::is_set(&glyph, col, row) {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = origin + col * scale + dx;
                        let y = top + row * scale + dy;
                        if x < width && y < height {
                            let offset = (y as usize * width as usize + x as usize) * 3;
                            pixels[offset..offset + 3].copy_from_slice(&color);
                        }
                    }
                }
            }
        }
    }
}

/// Render bars and optional text as an SVG document
pub fn render_svg(settings: &BarcodeSettings) -> Result<String, BarcodeError> {
    let pattern = prepare(settings)?;
    let (width, height) = image_size(&pattern, settings)?;
    let margin = settings.margin;
    let module = settings.module_width;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        width,
        height,
        escape_xml(&settings.background)
    ));
    svg.push_str(&format!(r#"<g fill="{}">"#, escape_xml(&settings.line_color)));
    for (start, run) in pattern.bars() {
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
            margin + start as u32 * module,
            margin,
            run as u32 * module,
            settings.height
        ));
    }

    if settings.display_value {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="monospace" font-size="{}">{}</text>"#,
            width / 2,
            margin + settings.height + settings.text_margin + settings.font_size,
            settings.font_size,
            escape_xml(&pattern.text)
        ));
    }

    svg.push_str("</g></svg>");
    Ok(svg)
}

/// Output image format for [`to_data_url`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Render and wrap as a base64 `data:` URL
pub fn to_data_url(settings: &BarcodeSettings, format: ImageFormat) -> Result<String, BarcodeError> {
    let bytes = match format {
        ImageFormat::Png => render_png(settings)?,
        ImageFormat::Svg => render_svg(settings)?.into_bytes(),
    };
    Ok(format!(
        "data:{};base64,{}",
        format.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000").unwrap(), [255, 0, 0]);
        assert_eq!(parse_hex_color("00ff80").unwrap(), [0, 255, 128]);
        assert_eq!(parse_hex_color("#fff").unwrap(), [255, 255, 255]);
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("red").is_err());
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r#"{"content":"ABC","format":"CODE39","moduleWidth":3}"#;
        let settings: BarcodeSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.format, Symbology::Code39);
        assert_eq!(settings.module_width, 3);
        assert_eq!(settings.height, 100);
        assert!(settings.display_value);
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let mut settings = BarcodeSettings::new("ABC", Symbology::Code128);
        settings.module_width = 0;
        assert!(matches!(
            settings.validate(),
            Err(BarcodeError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_png_has_signature_and_size() {
        let settings = BarcodeSettings::new("Hello", Symbology::Code128);
        let png_bytes = render_png(&settings).unwrap();
        assert!(png_bytes.starts_with(&[0x89, b'P', b'N', b'G']));

        let decoder = png::Decoder::new(png_bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        // (7 symbols * 11 + 13 stop) modules * 2 px + 2 * 10 margin
        assert_eq!(info.width, 90 * 2 + 20);
        // bars + margins + text margin + font size
        assert_eq!(info.height, 100 + 20 + 2 + 20);
    }

    fn decode_rgb(png_bytes: &[u8]) -> (u32, u32, Vec<u8>) {
        let decoder = png::Decoder::new(png_bytes);
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info.width, info.height, buf)
    }

    fn dark_pixels_in_rows(pixels: &[u8], width: u32, rows: std::ops::Range<u32>) -> usize {
        rows.flat_map(move |y| (0..width).map(move |x| (y * width + x) as usize * 3))
            .filter(|&offset| pixels[offset] == 0)
            .count()
    }

    #[test]
    fn test_png_draws_caption_below_bars() {
        let settings = BarcodeSettings::new("HELLO", Symbology::Code128);
        let (width, height, pixels) = decode_rgb(&render_png(&settings).unwrap());
        assert_eq!(height, 142);

        // gap between bars and caption stays blank
        assert_eq!(dark_pixels_in_rows(&pixels, width, 110..112), 0);
        // caption band
        assert!(dark_pixels_in_rows(&pixels, width, 112..132) > 0);
        // bottom margin
        assert_eq!(dark_pixels_in_rows(&pixels, width, 132..142), 0);
    }

    #[test]
    fn test_png_without_caption() {
        let mut settings = BarcodeSettings::new("HELLO", Symbology::Code128);
        settings.display_value = false;
        let (width, height, pixels) = decode_rgb(&render_png(&settings).unwrap());
        assert_eq!(height, 120);
        assert_eq!(dark_pixels_in_rows(&pixels, width, 110..120), 0);
    }

    #[test]
    fn test_oversized_input_is_rejected_before_rendering() {
        let settings = BarcodeSettings::new("A".repeat(10_000), Symbology::Code128);
        assert!(matches!(
            render_png(&settings),
            Err(BarcodeError::InvalidSettings(_))
        ));

        let mut settings = BarcodeSettings::new("A".repeat(MAX_CONTENT_LEN), Symbology::Code39);
        settings.module_width = 4;
        settings.margin = 200;
        assert!(matches!(
            render_png(&settings),
            Err(BarcodeError::InvalidSettings(_))
        ));
        assert!(render_svg(&settings).is_err());

        let mut settings = BarcodeSettings::new("ABC", Symbology::Code128);
        settings.text_margin = u32::MAX;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_image_size_within_limits() {
        let settings = BarcodeSettings::new("Hello", Symbology::Code128);
        let pattern = encode(&settings.content, settings.format).unwrap();
        assert_eq!(image_size(&pattern, &settings).unwrap(), (200, 142));
    }

    #[test]
    fn test_svg_contains_text_when_displayed() {
        let settings = BarcodeSettings::new("A&B", Symbology::Code128);
        let svg = render_svg(&settings).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("A&amp;B"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_svg_without_text() {
        let mut settings = BarcodeSettings::new("12345670", Symbology::Ean8);
        settings.display_value = false;
        let svg = render_svg(&settings).unwrap();
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_svg_bar_count_matches_pattern() {
        let settings = BarcodeSettings::new("400638133393", Symbology::Ean13);
        let pattern = encode(&settings.content, settings.format).unwrap();
        let svg = render_svg(&settings).unwrap();
        // background rect plus one rect per bar
        assert_eq!(svg.matches("<rect").count(), pattern.bars().len() + 1);
    }

    #[test]
    fn test_data_url_prefix() {
        let settings = BarcodeSettings::new("TEST", Symbology::Code39);
        let url = to_data_url(&settings, ImageFormat::Png).unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
        let svg_url = to_data_url(&settings, ImageFormat::Svg).unwrap();
        assert!(svg_url.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_invalid_content_surfaces_encoder_error() {
        let settings = BarcodeSettings::new("not digits", Symbology::Ean13);
        assert!(matches!(
            render_png(&settings),
            Err(BarcodeError::InvalidCharacter { .. })
        ));
    }
}
