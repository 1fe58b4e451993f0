//! Code 39
//!
//! Nine elements per character, three of them wide. Characters are
//! separated by a narrow space and framed by `*`.

use super::{push_widths, BarcodePattern};
use crate::error::BarcodeError;
use crate::symbology::Symbology;

const NARROW: usize = 1;
const WIDE: usize = 3;

/// Element widths as bits (1 = wide), bar first
const TABLE: [(char, &str); 44] = [
    ('0', "000110100"),
    ('1', "100100001"),
    ('2', "001100001"),
    ('3', "101100000"),
    ('4', "000110001"),
    ('5', "100110000"),
    ('6', "001110000"),
    ('7', "000100101"),
    ('8', "100100100"),
    ('9', "001100100"),
    ('A', "100001001"),
    ('B', "001001001"),
    ('C', "101001000"),
    ('D', "000011001"),
    ('E', "100011000"),
    ('F', "001011000"),
    ('G', "000001101"),
    ('H', "100001100"),
    ('I', "001001100"),
    ('J', "000011100"),
    ('K', "100000011"),
    ('L', "001000011"),
    ('M', "101000010"),
    ('N', "000010011"),
    ('O', "100010010"),
    ('P', "001010010"),
    ('Q', "000000111"),
    ('R', "100000110"),
    ('S', "001000110"),
    ('T', "000010110"),
    ('U', "110000001"),
    ('V', "011000001"),
    ('W', "111000000"),
    ('X', "010010001"),
    ('Y', "110010000"),
    ('Z', "011010000"),
    ('-', "010000101"),
    ('.', "110000100"),
    (' ', "011000100"),
    ('$', "010101000"),
    ('/', "010100010"),
    ('+', "010001010"),
    ('%', "000101010"),
    ('*', "010010100"),
];

fn lookup(c: char) -> Option<&'static str> {
    TABLE
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, bits)| *bits)
}

/// Lowercase input is accepted and encoded as uppercase
pub fn encode(content: &str) -> Result<BarcodePattern, BarcodeError> {
    if content.is_empty() {
        return Err(BarcodeError::EmptyContent);
    }

    let text = content.to_ascii_uppercase();
    let mut elements = Vec::with_capacity(text.len() + 2);

    for c in text.chars() {
        match lookup(c) {
            Some(_) if c == '*' => {
                return Err(BarcodeError::InvalidCharacter {
                    character: c,
                    symbology: Symbology::Code39.to_string(),
                })
            }
            Some(bits) => elements.push(bits),
            None => {
                return Err(BarcodeError::InvalidCharacter {
                    character: c,
                    symbology: Symbology::Code39.to_string(),
                })
            }
        }
    }

    let star = lookup('*').unwrap_or_default();
    let mut modules = Vec::new();

    for (i, bits) in std::iter::once(star)
        .chain(elements)
        .chain(std::iter::once(star))
        .enumerate()
    {
        if i > 0 {
            modules.extend(std::iter::repeat(false).take(NARROW));
        }
        push_widths(
            &mut modules,
            bits.bytes()
                .map(|b| if b == b'1' { WIDE } else { NARROW }),
        );
    }

    Ok(BarcodePattern {
        symbology: Symbology::Code39,
        modules,
        text,
    })
}
