//! Scientific and engineering notation

use crate::error::{ensure_finite, CalcError};
use serde::{Deserialize, Serialize};

/// A number written as `coefficient × 10^exponent`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScientificNotation {
    pub coefficient: f64,
    pub exponent: i32,
}

impl ScientificNotation {
    /// Normalize `x` so that `1 <= |coefficient| < 10`. Zero maps to `0 × 10^0`.
    pub fn from_f64(x: f64) -> Result<Self, CalcError> {
        ensure_finite(x)?;
        if x == 0.0 {
            return Ok(Self {
                coefficient: 0.0,
                exponent: 0,
            });
        }

        // `{:e}` prints the shortest round-trip digits as `d.ddde-n`, subnormals included
        let text = format!("{:e}", x);
        let (mantissa, exponent) = text
            .split_once('e')
            .ok_or_else(|| CalcError::InvalidNumber(text.clone()))?;
        let coefficient: f64 = mantissa
            .parse()
            .map_err(|_| CalcError::InvalidNumber(text.clone()))?;
        let exponent: i32 = exponent
            .parse()
            .map_err(|_| CalcError::InvalidNumber(text.clone()))?;

        Ok(Self {
            coefficient,
            exponent,
        })
    }

    /// Engineering form: exponent snapped down to a multiple of 3
    pub fn to_engineering(self) -> Self {
        if self.coefficient == 0.0 {
            return self;
        }
        let exponent = self.exponent.div_euclid(3) * 3;
        Self {
            coefficient: self.coefficient * pow10(self.exponent - exponent),
            exponent,
        }
    }

    /// Reconstruct the plain value
    pub fn value(&self) -> f64 {
        scale(self.coefficient, self.exponent)
    }

    /// `1.23 × 10^4`
    pub fn format(&self, precision: usize) -> String {
        format!(
            "{} × 10^{}",
            format_coefficient(self.coefficient, precision),
            self.exponent
        )
    }

    /// `1.23e4`
    pub fn format_e(&self, precision: usize) -> String {
        format!(
            "{}e{}",
            format_coefficient(self.coefficient, precision),
            self.exponent
        )
    }
}

/// Both notations for one input, as shown on the converter page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotationResult {
    pub input: f64,
    pub scientific: ScientificNotation,
    pub engineering: ScientificNotation,
    pub scientific_text: String,
    pub e_notation: String,
    pub engineering_text: String,
}

/// Convert a number into scientific and engineering notation
pub fn convert(x: f64, precision: usize) -> Result<NotationResult, CalcError> {
    let scientific = ScientificNotation::from_f64(x)?;
    let engineering = scientific.to_engineering();
    Ok(NotationResult {
        input: x,
        scientific,
        engineering,
        scientific_text: scientific.format(precision),
        e_notation: scientific.format_e(precision),
        engineering_text: engineering.format(precision),
    })
}

/// Parse a decimal, E-notation (`1.5e-3`) or `1.5 × 10^-3` string
pub fn parse_notation(input: &str) -> Result<f64, CalcError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CalcError::InvalidNumber(input.to_string()));
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    let value = if let Some((coefficient, exponent)) = split_times_ten(&compact) {
        let coefficient: f64 = coefficient
            .parse()
            .map_err(|_| CalcError::InvalidNumber(input.to_string()))?;
        let exponent: i32 = exponent
            .trim_start_matches('+')
            .parse()
            .map_err(|_| CalcError::InvalidNumber(input.to_string()))?;
        scale(coefficient, exponent)
    } else {
        compact
            .parse::<f64>()
            .map_err(|_| CalcError::InvalidNumber(input.to_string()))?
    };

    ensure_finite(value)
}

/// Split `c×10^e` (also `x`, `*`) into its two halves
fn split_times_ten(s: &str) -> Option<(&str, &str)> {
    for marker in ["×10^", "x10^", "X10^", "*10^"] {
        if let Some((coefficient, exponent)) = s.split_once(marker) {
            return Some((coefficient, exponent));
        }
    }
    None
}

fn pow10(exponent: i32) -> f64 {
    10f64.powi(exponent)
}

/// `coefficient × 10^exponent` rounded once, so exponents past the
/// range of `powi` (below -308, subnormals) still come back exact
fn scale(coefficient: f64, exponent: i32) -> f64 {
    format!("{}e{}", coefficient, exponent)
        .parse()
        .unwrap_or(f64::NAN)
}

/// Fixed precision with trailing zeros removed
fn format_coefficient(coefficient: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, coefficient);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
