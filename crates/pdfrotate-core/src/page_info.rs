//! Page-level information extraction
//!
//! Page size and current rotation, following inheritance from the page tree.

use crate::error::RotateError;
use crate::rotation::Rotation;
use lopdf::{Dictionary, Document, Object};
use serde::Serialize;

/// Information about a single PDF page
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    /// Page number (1-indexed)
    pub page_num: u32,
    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Rotation already stored in the PDF
    pub rotation: Rotation,
    /// Estimated orientation based on dimensions and rotation
    pub orientation: PageOrientation,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub enum PageOrientation {
    Portrait,
    Landscape,
    Square,
}

impl PageOrientation {
    /// Orientation of a `width` x `height` page displayed with `rotation`
    pub fn of(width: f64, height: f64, rotation: Rotation) -> Self {
        let (w, h) = if rotation.is_sideways() {
            (height, width)
        } else {
            (width, height)
        };

        if (w - h).abs() < 1.0 {
            PageOrientation::Square
        } else if w > h {
            PageOrientation::Landscape
        } else {
            PageOrientation::Portrait
        }
    }
}

impl PageInfo {
    pub fn from_document(doc: &Document, page_num: u32) -> Result<Self, RotateError> {
        let page_dict = page_dict(doc, page_num)?;

        let media_box = media_box(doc, page_dict)?;
        let (width, height) = (media_box[2] - media_box[0], media_box[3] - media_box[1]);
        let rotation = effective_rotation(doc, page_dict);

        Ok(Self {
            page_num,
            width: width as f32,
            height: height as f32,
            rotation,
            orientation: PageOrientation::of(width, height, rotation),
        })
    }

    pub fn all_from_document(doc: &Document) -> Result<Vec<Self>, RotateError> {
        let count = doc.get_pages().len() as u32;
        (1..=count)
            .map(|page_num| Self::from_document(doc, page_num))
            .collect()
    }
}

/// Look up a page dictionary by 1-indexed page number
pub(crate) fn page_dict(doc: &Document, page_num: u32) -> Result<&Dictionary, RotateError> {
    let pages = doc.get_pages();
    let page_id = pages.get(&page_num).ok_or(RotateError::PageOutOfRange {
        page: page_num,
        page_count: pages.len() as u32,
    })?;

    doc.objects
        .get(page_id)
        .ok_or_else(|| RotateError::InvalidPdf(format!("Page {} object not found", page_num)))?
        .as_dict()
        .map_err(|_| RotateError::InvalidPdf(format!("Page {} is not a dictionary", page_num)))
}

/// Look up a key on the page, then up the `/Parent` chain
fn inherited<'a>(doc: &'a Document, page_dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut current = page_dict;
    // Bounded walk in case of a malformed, cyclic page tree
    for _ in 0..32 {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        current = current
            .get(b"Parent")
            .and_then(|p| p.as_reference())
            .ok()
            .and_then(|id| doc.objects.get(&id))
            .and_then(|obj| obj.as_dict().ok())?;
    }
    None
}

/// MediaBox, inherited if needed, defaulting to US Letter
fn media_box(doc: &Document, page_dict: &Dictionary) -> Result<[f64; 4], RotateError> {
    match inherited(doc, page_dict, b"MediaBox").and_then(|obj| obj.as_array().ok()) {
        Some(array) => parse_box_array(array),
        None => Ok([0.0, 0.0, 612.0, 792.0]),
    }
}

/// Parse a box array [x1, y1, x2, y2]
fn parse_box_array(array: &[Object]) -> Result<[f64; 4], RotateError> {
    if array.len() != 4 {
        return Err(RotateError::InvalidPdf(
            "MediaBox must have 4 elements".to_string(),
        ));
    }

    let mut result = [0.0; 4];
    for (i, obj) in array.iter().enumerate() {
        result[i] = match obj {
            Object::Integer(n) => *n as f64,
            Object::Real(n) => *n as f64,
            _ => {
                return Err(RotateError::InvalidPdf(format!(
                    "MediaBox element {} is not a number",
                    i
                )))
            }
        };
    }

    Ok(result)
}

/// Rotation the viewer applies to this page today. Values that are not a
/// multiple of 90 are treated as 0, as viewers do.
pub(crate) fn effective_rotation(doc: &Document, page_dict: &Dictionary) -> Rotation {
    inherited(doc, page_dict, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .and_then(|degrees| Rotation::from_degrees(degrees).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_pdf::{create_test_pdf, create_test_pdf_with_inherited_rotation};

    #[test]
    fn test_parse_box_array() {
        let array = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(612.0),
            Object::Real(792.0),
        ];
        let result = parse_box_array(&array).unwrap();
        assert_eq!(result, [0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn test_parse_box_array_wrong_length() {
        assert!(parse_box_array(&[Object::Integer(0)]).is_err());
    }

    #[test]
    fn test_orientation_accounts_for_rotation() {
        assert_eq!(
            PageOrientation::of(612.0, 792.0, Rotation::Deg0),
            PageOrientation::Portrait
        );
        assert_eq!(
            PageOrientation::of(612.0, 792.0, Rotation::Deg90),
            PageOrientation::Landscape
        );
        assert_eq!(
            PageOrientation::of(500.0, 500.5, Rotation::Deg0),
            PageOrientation::Square
        );
    }

    #[test]
    fn test_page_info_from_document() {
        let pdf = create_test_pdf(2);
        let doc = Document::load_mem(&pdf).unwrap();
        let info = PageInfo::from_document(&doc, 2).unwrap();
        assert_eq!(info.width, 612.0);
        assert_eq!(info.height, 792.0);
        assert_eq!(info.rotation, Rotation::Deg0);
        assert_eq!(info.orientation, PageOrientation::Portrait);
    }

    #[test]
    fn test_page_info_inherits_rotation() {
        let pdf = create_test_pdf_with_inherited_rotation(3, 90);
        let doc = Document::load_mem(&pdf).unwrap();
        let infos = PageInfo::all_from_document(&doc).unwrap();
        assert_eq!(infos.len(), 3);
        assert!(infos.iter().all(|i| i.rotation == Rotation::Deg90));
        assert_eq!(infos[0].orientation, PageOrientation::Landscape);
    }

    #[test]
    fn test_page_info_missing_page() {
        let pdf = create_test_pdf(1);
        let doc = Document::load_mem(&pdf).unwrap();
        assert!(matches!(
            PageInfo::from_document(&doc, 5),
            Err(RotateError::PageOutOfRange { page: 5, .. })
        ));
    }
}
