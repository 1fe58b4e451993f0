//! Code 128 (subsets B and C)
//!
//! Printable ASCII goes through subset B. Runs of four or more digits switch
//! to subset C, which packs two digits per symbol.

use super::{push_widths, BarcodePattern};
use crate::error::BarcodeError;
use crate::symbology::Symbology;

/// Bar/space widths for symbol values 0..=105, then the stop pattern
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221",
    "223211", "221132", "221231", "213212", "223112", "312131", "311222", "321122", "321221",
    "312212", "322112", "322211", "212123", "212321", "232121", "111323", "131123", "131321",
    "112313", "132113", "132311", "211313", "231113", "231311", "112133", "112331", "132131",
    "113123", "113321", "133121", "313121", "211331", "231131", "213113", "213311", "213131",
    "311123", "311321", "331121", "312113", "312311", "332111", "314111", "221411", "431111",
    "111224", "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111", "111242",
    "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", "114131", "311141", "411131", "211412", "211214", "211232", "2331112",
];

const CODE_C: u8 = 99;
const CODE_B: u8 = 100;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: usize = 106;

/// Shortest digit run worth switching to subset C for
const MIN_C_RUN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CodeSet {
    B,
    C,
}

/// Symbol values for `content`, starting with the start code and without
/// the checksum
pub fn symbol_values(content: &str) -> Result<Vec<u8>, BarcodeError> {
    if content.is_empty() {
        return Err(BarcodeError::EmptyContent);
    }

    let bytes = content.as_bytes();
    if let Some(c) = content.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(BarcodeError::InvalidCharacter {
            character: c,
            symbology: Symbology::Code128.to_string(),
        });
    }

    let digit_run = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let first_run = digit_run(0);
    let mut set = if first_run >= MIN_C_RUN || (first_run == bytes.len() && first_run % 2 == 0) {
        CodeSet::C
    } else {
        CodeSet::B
    };

    let mut values = vec![if set == CodeSet::C { START_C } else { START_B }];
    let mut i = 0;

    while i < bytes.len() {
        match set {
            CodeSet::C => {
                if digit_run(i) >= 2 {
                    values.push((bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0'));
                    i += 2;
                } else {
                    values.push(CODE_B);
                    set = CodeSet::B;
                }
            }
            CodeSet::B => {
                let run = digit_run(i);
                if run >= MIN_C_RUN && run % 2 == 0 {
                    values.push(CODE_C);
                    set = CodeSet::C;
                } else {
                    values.push(bytes[i] - b' ');
                    i += 1;
                }
            }
        }
    }

    Ok(values)
}

/// Mod-103 weighted checksum
pub fn checksum(values: &[u8]) -> u8 {
    let sum: usize = values
        .iter()
        .enumerate()
        .map(|(i, &v)| v as usize * i.max(1))
        .sum();
    (sum % 103) as u8
}

pub fn encode(content: &str) -> Result<BarcodePattern, BarcodeError> {
    let mut values = symbol_values(content)?;
    values.push(checksum(&values));

    let mut modules = Vec::with_capacity(values.len() * 11 + 13);
    for &value in &values {
        push_widths(&mut modules, widths(PATTERNS[value as usize]));
    }
    push_widths(&mut modules, widths(PATTERNS[STOP]));

    Ok(BarcodePattern {
        symbology: Symbology::Code128,
        modules,
        text: content.to_string(),
    })
}

fn widths(pattern: &str) -> impl Iterator<Item = usize> + '_ {
    pattern.bytes().map(|b| (b - b'0') as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_symbol_is_eleven_modules() {
        for pattern in &PATTERNS[..STOP] {
            assert_eq!(widths(pattern).sum::<usize>(), 11, "{}", pattern);
        }
        assert_eq!(widths(PATTERNS[STOP]).sum::<usize>(), 13);
    }

    #[test]
    fn test_subset_b_values() {
        // "Hi" -> H=40, i=73
        assert_eq!(symbol_values("Hi").unwrap(), vec![START_B, 40, 73]);
    }

    #[test]
    fn test_all_digits_use_subset_c() {
        assert_eq!(symbol_values("123456").unwrap(), vec![START_C, 12, 34, 56]);
    }

    #[test]
    fn test_odd_digit_run_finishes_in_b() {
        assert_eq!(
            symbol_values("12345").unwrap(),
            vec![START_C, 12, 34, CODE_B, 21]
        );
    }

    #[test]
    fn test_switches_to_c_mid_string() {
        // "AB" then six digits
        assert_eq!(
            symbol_values("AB123456").unwrap(),
            vec![START_B, 33, 34, CODE_C, 12, 34, 56]
        );
    }

    #[test]
    fn test_short_digit_run_stays_in_b() {
        assert_eq!(symbol_values("A12").unwrap(), vec![START_B, 33, 17, 18]);
    }

    #[test]
    fn test_checksum_known_value() {
        // Start B (104) + P(48)*1 + J(42)*2 + Z(58)*3 = 410, 410 % 103 = 101
        let values = vec![START_B, 48, 42, 58];
        assert_eq!(checksum(&values), 101);
    }

    #[test]
    fn test_module_count() {
        let pattern = encode("Hello").unwrap();
        // start + 5 chars + checksum, 11 modules each, plus 13 for stop
        assert_eq!(pattern.width(), 7 * 11 + 13);
        assert!(pattern.modules[0]);
        assert!(*pattern.modules.last().unwrap());
    }

    #[test]
    fn test_rejects_non_printable() {
        assert!(matches!(
            encode("tab\there"),
            Err(BarcodeError::InvalidCharacter { character: '\t', .. })
        ));
        assert!(encode("café").is_err());
    }
}
