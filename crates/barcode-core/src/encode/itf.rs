//! ITF-14 (interleaved 2 of 5 carrying a GTIN-14)

use super::ean::digits_with_check;
use super::{push_widths, BarcodePattern};
use crate::error::BarcodeError;
use crate::symbology::Symbology;

const NARROW: usize = 1;
const WIDE: usize = 3;

/// Five elements per digit, 1 = wide
const DIGITS: [&str; 10] = [
    "00110", "10001", "01001", "11000", "00101", "10100", "01100", "00011", "10010", "01010",
];

const START: [usize; 4] = [NARROW, NARROW, NARROW, NARROW];
const STOP: [usize; 3] = [WIDE, NARROW, NARROW];

fn width(bit: u8) -> usize {
    if bit == b'1' {
        WIDE
    } else {
        NARROW
    }
}

pub fn encode_itf14(content: &str) -> Result<BarcodePattern, BarcodeError> {
    let digits = digits_with_check(content, 13, Symbology::Itf14)?;

    let mut widths = Vec::with_capacity(START.len() + digits.len() * 5 + STOP.len());
    widths.extend(START);

    // First digit of each pair drives the bars, second the spaces
    for pair in digits.chunks(2) {
        let bars = DIGITS[pair[0] as usize].as_bytes();
        let spaces = DIGITS[pair[1] as usize].as_bytes();
        for (&bar, &space) in bars.iter().zip(spaces) {
            widths.push(width(bar));
            widths.push(width(space));
        }
    }

    widths.extend(STOP);

    let mut modules = Vec::new();
    push_widths(&mut modules, widths);

    Ok(BarcodePattern {
        symbology: Symbology::Itf14,
        modules,
        text: digits.iter().map(|d| char::from(b'0' + d)).collect(),
    })
}
