//! EAN-13, EAN-8 and UPC-A
//!
//! Content may omit the check digit (it is computed) or include it (it is
//! verified).

use super::{push_bits, BarcodePattern};
use crate::error::BarcodeError;
use crate::symbology::Symbology;

const L_CODES: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011", "0110001", "0101111", "0111011",
    "0110111", "0001011",
];
const G_CODES: [&str; 10] = [
    "0100111", "0110011", "0011011", "0100001", "0011101", "0111001", "0000101", "0010001",
    "0001001", "0010111",
];
const R_CODES: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100", "1001110", "1010000", "1000100",
    "1001000", "1110100",
];

/// Left-half parity per EAN-13 leading digit (`G` marks even parity)
const PARITY: [&str; 10] = [
    "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG", "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL",
    "LGGLGL",
];

const GUARD: &str = "101";
const CENTER: &str = "01010";

/// GTIN check digit: weights 3,1,3,... from the rightmost data digit
pub fn check_digit(data: &[u8]) -> u8 {
    let sum: u32 = data
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Parse digits, appending or verifying the check digit.
/// `data_len` is the length without the check digit.
pub(crate) fn digits_with_check(
    content: &str,
    data_len: usize,
    symbology: Symbology,
) -> Result<Vec<u8>, BarcodeError> {
    if content.is_empty() {
        return Err(BarcodeError::EmptyContent);
    }
    if let Some(c) = content.chars().find(|c| !c.is_ascii_digit()) {
        return Err(BarcodeError::InvalidCharacter {
            character: c,
            symbology: symbology.to_string(),
        });
    }

    let mut digits: Vec<u8> = content.bytes().map(|b| b - b'0').collect();

    if digits.len() == data_len {
        digits.push(check_digit(&digits));
    } else if digits.len() == data_len + 1 {
        let expected = check_digit(&digits[..data_len]);
        let found = digits[data_len];
        if expected != found {
            return Err(BarcodeError::ChecksumMismatch { expected, found });
        }
    } else {
        return Err(BarcodeError::InvalidLength {
            symbology: symbology.to_string(),
            message: format!(
                "expected {} or {} digits, got {}",
                data_len,
                data_len + 1,
                digits.len()
            ),
        });
    }

    Ok(digits)
}

fn digits_text(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Guard, left half, center, right half, guard
fn assemble(left: &[&str], right: &[u8]) -> Vec<bool> {
    let mut modules = Vec::with_capacity(3 + left.len() * 7 + 5 + right.len() * 7 + 3);
    push_bits(&mut modules, GUARD);
    for bits in left {
        push_bits(&mut modules, bits);
    }
    push_bits(&mut modules, CENTER);
    for &d in right {
        push_bits(&mut modules, R_CODES[d as usize]);
    }
    push_bits(&mut modules, GUARD);
    modules
}

pub fn encode_ean13(content: &str) -> Result<BarcodePattern, BarcodeError> {
    let digits = digits_with_check(content, 12, Symbology::Ean13)?;

    let parity = PARITY[digits[0] as usize].as_bytes();
    let left: Vec<&str> = digits[1..7]
        .iter()
        .zip(parity)
        .map(|(&d, &p)| {
            if p == b'G' {
                G_CODES[d as usize]
            } else {
                L_CODES[d as usize]
            }
        })
        .collect();

    Ok(BarcodePattern {
        symbology: Symbology::Ean13,
        modules: assemble(&left, &digits[7..]),
        text: digits_text(&digits),
    })
}

pub fn encode_ean8(content: &str) -> Result<BarcodePattern, BarcodeError> {
    let digits = digits_with_check(content, 7, Symbology::Ean8)?;
    let left: Vec<&str> = digits[..4].iter().map(|&d| L_CODES[d as usize]).collect();

    Ok(BarcodePattern {
        symbology: Symbology::Ean8,
        modules: assemble(&left, &digits[4..]),
        text: digits_text(&digits),
    })
}

pub fn encode_upca(content: &str) -> Result<BarcodePattern, BarcodeError> {
    let digits = digits_with_check(content, 11, Symbology::UpcA)?;
    let left: Vec<&str> = digits[..6].iter().map(|&d| L_CODES[d as usize]).collect();

    Ok(BarcodePattern {
        symbology: Symbology::UpcA,
        modules: assemble(&left, &digits[6..]),
        text: digits_text(&digits),
    })
}
