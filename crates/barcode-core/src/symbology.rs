//! Supported barcode symbologies

use crate::error::BarcodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Symbology {
    #[default]
    #[serde(rename = "CODE128")]
    Code128,
    #[serde(rename = "CODE39")]
    Code39,
    #[serde(rename = "EAN13")]
    Ean13,
    #[serde(rename = "EAN8")]
    Ean8,
    #[serde(rename = "UPC")]
    UpcA,
    #[serde(rename = "ITF14")]
    Itf14,
}

impl Symbology {
    pub const ALL: [Symbology; 6] = [
        Symbology::Code128,
        Symbology::Code39,
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::UpcA,
        Symbology::Itf14,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Symbology::Code128 => "CODE128",
            Symbology::Code39 => "CODE39",
            Symbology::Ean13 => "EAN13",
            Symbology::Ean8 => "EAN8",
            Symbology::UpcA => "UPC",
            Symbology::Itf14 => "ITF14",
        }
    }

    /// Hint shown next to the content field
    pub fn description(&self) -> &'static str {
        match self {
            Symbology::Code128 => "Printable ASCII, any length",
            Symbology::Code39 => "A-Z, 0-9 and - . $ / + % space",
            Symbology::Ean13 => "12 digits (check digit added) or 13 digits",
            Symbology::Ean8 => "7 digits (check digit added) or 8 digits",
            Symbology::UpcA => "11 digits (check digit added) or 12 digits",
            Symbology::Itf14 => "13 digits (check digit added) or 14 digits",
        }
    }

    /// Whether the symbology carries a GTIN check digit
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Symbology::Code128 | Symbology::Code39)
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbology {
    type Err = BarcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "CODE128" | "C128" => Ok(Symbology::Code128),
            "CODE39" | "C39" => Ok(Symbology::Code39),
            "EAN13" => Ok(Symbology::Ean13),
            "EAN8" => Ok(Symbology::Ean8),
            "UPC" | "UPCA" => Ok(Symbology::UpcA),
            "ITF14" | "ITF" => Ok(Symbology::Itf14),
            _ => Err(BarcodeError::UnknownSymbology(s.to_string())),
        }
    }
}
