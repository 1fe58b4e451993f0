//! PDF page rotation
//!
//! This crate provides client-side PDF page rotation using lopdf.
//!
//! - `validation`: file checks and the info shown for an uploaded PDF
//! - `page_info`: per-page size and current rotation
//! - `rotation`: quarter-turn values and the per-page rotation map
//! - `rotate`: write the requested rotations and serialize the document

pub mod error;
pub mod page_info;
pub mod rotate;
pub mod rotation;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_pdf;

pub use error::RotateError;
pub use page_info::{PageInfo, PageOrientation};
pub use rotate::{apply_rotations, rotate_all_pages, rotate_document, rotate_pages};
pub use rotation::{Rotation, RotationMap};
pub use validation::{quick_validate, validate_pdf, PdfInfo};

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, RotateError> {
    let doc =
        lopdf::Document::load_mem(bytes).map_err(|e| RotateError::ParseError(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}

/// Highest page number a selection may name without a known page count
pub const MAX_PAGE_NUMBER: u32 = 100_000;

/// Parse page range string like "1-3, 5, 8-10" into sorted unique page numbers
pub fn parse_ranges(input: &str) -> Result<Vec<u32>, RotateError> {
    collect_ranges(input, None)
}

/// Parse a page selection and check it against the document's page count
///
/// Bounds are checked before a range is expanded, so `1-4294967295`
/// fails without allocating.
pub fn parse_ranges_for(input: &str, page_count: u32) -> Result<Vec<u32>, RotateError> {
    collect_ranges(input, Some(page_count))
}

fn collect_ranges(input: &str, page_count: Option<u32>) -> Result<Vec<u32>, RotateError> {
    use std::collections::BTreeSet;

    let check_bound = |page: u32| match page_count {
        Some(page_count) if page > page_count => {
            Err(RotateError::PageOutOfRange { page, page_count })
        }
        None if page > MAX_PAGE_NUMBER => Err(RotateError::InvalidRange(format!(
            "Page {} exceeds the limit of {}",
            page, MAX_PAGE_NUMBER
        ))),
        _ => Ok(()),
    };

    let mut pages = BTreeSet::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let start: u32 = start
                .trim()
                .parse()
                .map_err(|_| RotateError::InvalidRange(format!("Invalid start: {}", start)))?;
            let end: u32 = end
                .trim()
                .parse()
                .map_err(|_| RotateError::InvalidRange(format!("Invalid end: {}", end)))?;

            if start > end {
                return Err(RotateError::InvalidRange(format!(
                    "Start {} > end {}",
                    start, end
                )));
            }
            if start == 0 {
                return Err(RotateError::InvalidRange(
                    "Page numbers must be >= 1".into(),
                ));
            }
            // Report the first page past the end, not the range's upper bound
            if let Some(page_count) = page_count {
                check_bound(start.max(page_count.saturating_add(1)).min(end))?;
            } else {
                check_bound(end)?;
            }

            pages.extend(start..=end);
        } else {
            let page: u32 = part
                .parse()
                .map_err(|_| RotateError::InvalidRange(format!("Invalid page: {}", part)))?;
            if page == 0 {
                return Err(RotateError::InvalidRange(
                    "Page numbers must be >= 1".into(),
                ));
            }
            check_bound(page)?;
            pages.insert(page);
        }
    }

    Ok(pages.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ranges_single() {
        assert_eq!(parse_ranges("5").unwrap(), vec![5]);
    }

    #[test]
    fn test_parse_ranges_complex() {
        let result = parse_ranges("1-3, 5, 8-10").unwrap();
        assert_eq!(result, vec![1, 2, 3, 5, 8, 9, 10]);
    }

    #[test]
    fn test_parse_ranges_deduplicates() {
        assert_eq!(parse_ranges("1-3, 2-4").unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_ranges_rejects_zero() {
        assert!(parse_ranges("0").is_err());
        assert!(parse_ranges("0-2").is_err());
    }

    #[test]
    fn test_parse_ranges_rejects_reversed() {
        assert!(parse_ranges("5-2").is_err());
    }

    #[test]
    fn test_parse_ranges_for_checks_bounds() {
        assert_eq!(parse_ranges_for("1-3", 3).unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            parse_ranges_for("2, 7", 3),
            Err(RotateError::PageOutOfRange { page: 7, .. })
        ));
    }

    #[test]
    fn test_parse_ranges_for_rejects_huge_range_early() {
        assert!(matches!(
            parse_ranges_for("1-4294967295", 3),
            Err(RotateError::PageOutOfRange {
                page: 4,
                page_count: 3
            })
        ));
        assert!(matches!(
            parse_ranges_for("2-5", 3),
            Err(RotateError::PageOutOfRange { page: 4, .. })
        ));
        assert!(matches!(
            parse_ranges_for("4294967295", 3),
            Err(RotateError::PageOutOfRange { page: 4294967295, .. })
        ));
    }

    #[test]
    fn test_parse_ranges_caps_unbounded_selection() {
        assert!(matches!(
            parse_ranges("1-4294967295"),
            Err(RotateError::InvalidRange(_))
        ));
        assert!(parse_ranges(&format!("{}", MAX_PAGE_NUMBER + 1)).is_err());
        assert_eq!(parse_ranges(&format!("{}", MAX_PAGE_NUMBER)).unwrap(), vec![MAX_PAGE_NUMBER]);
    }

    #[test]
    fn test_get_page_count() {
        let pdf = test_pdf::create_test_pdf(4);
        assert_eq!(get_page_count(&pdf).unwrap(), 4);
    }
}
