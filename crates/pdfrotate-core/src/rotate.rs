//! Apply a rotation map to a PDF
//!
//! Each requested rotation is added to the rotation the page already
//! displays with (including one inherited from the page tree), and the sum
//! is written to the page's own `/Rotate` entry.

use crate::error::RotateError;
use crate::page_info::{effective_rotation, page_dict};
use crate::rotation::{Rotation, RotationMap};
use lopdf::{Document, Object};

/// Rotate pages of a PDF and return the serialized result
pub fn apply_rotations(bytes: &[u8], map: &RotationMap) -> Result<Vec<u8>, RotateError> {
    if map.is_identity() {
        return Ok(bytes.to_vec());
    }

    let mut doc =
        Document::load_mem(bytes).map_err(|e| RotateError::ParseError(e.to_string()))?;

    rotate_document(&mut doc, map)?;

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| RotateError::OperationError(format!("Save failed: {}", e)))?;

    tracing::debug!(
        pages = map.len(),
        input_bytes = bytes.len(),
        output_bytes = output.len(),
        "applied page rotations"
    );

    Ok(output)
}

/// Rotate the given pages by the same amount
pub fn rotate_pages(bytes: &[u8], pages: &[u32], rotation: Rotation) -> Result<Vec<u8>, RotateError> {
    if pages.is_empty() {
        return Err(RotateError::InvalidRange("No pages specified".into()));
    }
    let mut map = RotationMap::new();
    map.rotate_all(pages.iter().copied(), rotation);
    apply_rotations(bytes, &map)
}

/// Rotate every page of the document by the same amount
pub fn rotate_all_pages(bytes: &[u8], rotation: Rotation) -> Result<Vec<u8>, RotateError> {
    let page_count = crate::get_page_count(bytes)?;
    let pages: Vec<u32> = (1..=page_count).collect();
    rotate_pages(bytes, &pages, rotation)
}

/// Apply the map to an in-memory document
pub fn rotate_document(doc: &mut Document, map: &RotationMap) -> Result<(), RotateError> {
    let pages = doc.get_pages();
    let page_count = pages.len() as u32;

    // Validate everything before touching the document
    let mut updates = Vec::with_capacity(map.len());
    for (page, requested) in map.iter() {
        let page_id = *pages
            .get(&page)
            .ok_or(RotateError::PageOutOfRange { page, page_count })?;
        let current = effective_rotation(doc, page_dict(doc, page)?);
        updates.push((page_id, current.compose(requested)));
    }

    for (page_id, rotation) in updates {
        let dict = doc
            .get_object_mut(page_id)
            .and_then(|obj| obj.as_dict_mut())
            .map_err(|e| RotateError::OperationError(e.to_string()))?;
        dict.set("Rotate", Object::Integer(rotation.degrees()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_info::PageInfo;
    use crate::test_pdf::{
        create_test_pdf, create_test_pdf_with_inherited_rotation,
        create_test_pdf_with_page_rotations,
    };

    fn rotations_of(bytes: &[u8]) -> Vec<i64> {
        let doc = Document::load_mem(bytes).unwrap();
        PageInfo::all_from_document(&doc)
            .unwrap()
            .iter()
            .map(|p| p.rotation.degrees())
            .collect()
    }

    #[test]
    fn test_empty_map_returns_original() {
        let pdf = create_test_pdf(2);
        let result = apply_rotations(&pdf, &RotationMap::new()).unwrap();
        assert_eq!(result, pdf);
    }

    #[test]
    fn test_rotate_single_page() {
        let pdf = create_test_pdf(3);
        let mut map = RotationMap::new();
        map.rotate(2, Rotation::Deg90);

        let result = apply_rotations(&pdf, &map).unwrap();
        assert!(result.starts_with(b"%PDF-"));
        assert_eq!(rotations_of(&result), vec![0, 90, 0]);
    }

    #[test]
    fn test_rotation_adds_to_existing() {
        let pdf = create_test_pdf_with_page_rotations(2, &[(1, 270)]);
        let mut map = RotationMap::new();
        map.rotate(1, Rotation::Deg180);
        map.rotate(2, Rotation::Deg270);

        let result = apply_rotations(&pdf, &map).unwrap();
        assert_eq!(rotations_of(&result), vec![90, 270]);
    }

    #[test]
    fn test_rotation_adds_to_inherited() {
        let pdf = create_test_pdf_with_inherited_rotation(2, 90);
        let result = rotate_pages(&pdf, &[1], Rotation::Deg90).unwrap();
        assert_eq!(rotations_of(&result), vec![180, 90]);
    }

    #[test]
    fn test_rotate_all_pages() {
        let pdf = create_test_pdf(4);
        let result = rotate_all_pages(&pdf, Rotation::Deg180).unwrap();
        assert_eq!(rotations_of(&result), vec![180; 4]);
    }

    #[test]
    fn test_page_out_of_range_fails() {
        let pdf = create_test_pdf(2);
        let mut map = RotationMap::new();
        map.rotate(3, Rotation::Deg90);
        assert!(matches!(
            apply_rotations(&pdf, &map),
            Err(RotateError::PageOutOfRange {
                page: 3,
                page_count: 2
            })
        ));
    }

    #[test]
    fn test_rotate_pages_requires_pages() {
        let pdf = create_test_pdf(2);
        assert!(rotate_pages(&pdf, &[], Rotation::Deg90).is_err());
    }

    #[test]
    fn test_invalid_pdf_fails() {
        let mut map = RotationMap::new();
        map.rotate(1, Rotation::Deg90);
        assert!(matches!(
            apply_rotations(b"not a pdf", &map),
            Err(RotateError::ParseError(_))
        ));
    }

    #[test]
    fn test_page_count_preserved() {
        let pdf = create_test_pdf(5);
        let result = rotate_pages(&pdf, &[1, 3, 5], Rotation::Deg270).unwrap();
        let doc = Document::load_mem(&result).unwrap();
        assert_eq!(doc.get_pages().len(), 5);
    }
}
