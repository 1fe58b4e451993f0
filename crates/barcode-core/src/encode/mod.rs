//! Symbology encoders
//!
//! Every encoder turns content into a row of modules (true = bar) plus the
//! human-readable text printed under the bars.

pub mod code128;
pub mod code39;
pub mod ean;
pub mod itf;

use crate::error::BarcodeError;
use crate::symbology::Symbology;
use serde::Serialize;

/// Encoded barcode, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarcodePattern {
    pub symbology: Symbology,
    /// One entry per module, left to right; `true` is a bar
    pub modules: Vec<bool>,
    /// Text printed under the bars (includes any computed check digit)
    pub text: String,
}

impl BarcodePattern {
    /// Width in modules
    pub fn width(&self) -> usize {
        self.modules.len()
    }

    /// Bars as `(start module, width in modules)` runs
    pub fn bars(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = None;

        for (i, &bar) in self.modules.iter().enumerate() {
            match (bar, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    runs.push((s, i - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.modules.len() - s));
        }

        runs
    }
}

/// Encode content with the given symbology
pub fn encode(content: &str, symbology: Symbology) -> Result<BarcodePattern, BarcodeError> {
    if content.is_empty() {
        return Err(BarcodeError::EmptyContent);
    }

    let pattern = match symbology {
        Symbology::Code128 => code128::encode(content)?,
        Symbology::Code39 => code39::encode(content)?,
        Symbology::Ean13 => ean::encode_ean13(content)?,
        Symbology::Ean8 => ean::encode_ean8(content)?,
        Symbology::UpcA => ean::encode_upca(content)?,
        Symbology::Itf14 => itf::encode_itf14(content)?,
    };

    tracing::debug!(
        symbology = %symbology,
        modules = pattern.width(),
        "encoded barcode"
    );

    Ok(pattern)
}

/// Append alternating bar/space runs, starting with a bar
pub(crate) fn push_widths(modules: &mut Vec<bool>, widths: impl IntoIterator<Item = usize>) {
    let mut bar = true;
    for width in widths {
        modules.extend(std::iter::repeat(bar).take(width));
        bar = !bar;
    }
}

/// Append a `"0101..."` bit string
pub(crate) fn push_bits(modules: &mut Vec<bool>, bits: &str) {
    modules.extend(bits.bytes().map(|b| b == b'1'));
}
