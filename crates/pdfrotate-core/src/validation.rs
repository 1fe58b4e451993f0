//! PDF validation and file info extraction

use crate::error::RotateError;
use lopdf::Document;
use serde::Serialize;

/// What the rotate page shows about an uploaded file
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct PdfInfo {
    pub page_count: u32,
    /// PDF version string (e.g., "1.7")
    pub version: String,
    pub encrypted: bool,
    pub size_bytes: usize,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Validate a PDF file and extract basic info
pub fn validate_pdf(bytes: &[u8]) -> Result<PdfInfo, RotateError> {
    check_header(bytes)?;

    let version = extract_version(bytes);
    let document =
        Document::load_mem(bytes).map_err(|e| RotateError::ParseError(e.to_string()))?;
    info_from_document(&document, version, bytes.len())
}

/// Build info from an already parsed document
pub fn info_from_document(
    document: &Document,
    version: String,
    size_bytes: usize,
) -> Result<PdfInfo, RotateError> {
    let page_count = document.get_pages().len() as u32;
    if page_count == 0 {
        return Err(RotateError::InvalidPdf("PDF has no pages".to_string()));
    }

    let (title, author) = extract_metadata(document);

    Ok(PdfInfo {
        page_count,
        version,
        encrypted: document.is_encrypted(),
        size_bytes,
        title,
        author,
    })
}

/// Header and `%%EOF` check without parsing
pub fn quick_validate(bytes: &[u8]) -> Result<(), RotateError> {
    check_header(bytes)?;

    let tail = if bytes.len() > 1024 {
        &bytes[bytes.len() - 1024..]
    } else {
        bytes
    };

    if !tail.windows(5).any(|w| w == b"%%EOF") {
        return Err(RotateError::InvalidPdf(
            "PDF appears truncated (missing %%EOF marker)".to_string(),
        ));
    }

    Ok(())
}

fn check_header(bytes: &[u8]) -> Result<(), RotateError> {
    if bytes.len() < 8 {
        return Err(RotateError::InvalidPdf(
            "File too small to be a valid PDF".to_string(),
        ));
    }
    if !bytes.starts_with(b"%PDF-") {
        return Err(RotateError::InvalidPdf(
            "Not a valid PDF file (missing %PDF- header)".to_string(),
        ));
    }
    Ok(())
}

/// Version from the `%PDF-x.y` header
pub fn extract_version(bytes: &[u8]) -> String {
    if bytes.len() >= 8 && bytes.starts_with(b"%PDF-") {
        if let Ok(version) = std::str::from_utf8(&bytes[5..8]) {
            return version.trim().to_string();
        }
    }
    "1.4".to_string()
}

fn extract_metadata(document: &Document) -> (Option<String>, Option<String>) {
    let info_dict = document
        .trailer
        .get(b"Info")
        .and_then(|obj| obj.as_reference())
        .ok()
        .and_then(|id| document.objects.get(&id))
        .and_then(|obj| obj.as_dict().ok());

    let Some(info_dict) = info_dict else {
        return (None, None);
    };

    let text = |key: &[u8]| {
        info_dict
            .get(key)
            .and_then(|obj| obj.as_str())
            .ok()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .filter(|s| !s.is_empty())
    };

    (text(b"Title"), text(b"Author"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_pdf::create_test_pdf;

    #[test]
    fn test_quick_validate_rejects_non_pdf() {
        assert!(quick_validate(b"not a pdf file").is_err());
    }

    #[test]
    fn test_quick_validate_rejects_small_file() {
        assert!(quick_validate(b"tiny").is_err());
    }

    #[test]
    fn test_quick_validate_accepts_valid_pdf() {
        let pdf = create_test_pdf(1);
        assert!(quick_validate(&pdf).is_ok());
    }

    #[test]
    fn test_validate_pdf_returns_page_count_and_size() {
        let pdf = create_test_pdf(5);
        let info = validate_pdf(&pdf).unwrap();
        assert_eq!(info.page_count, 5);
        assert_eq!(info.size_bytes, pdf.len());
        assert_eq!(info.version, "1.7");
        assert!(!info.encrypted);
    }

    #[test]
    fn test_validate_pdf_rejects_invalid_data() {
        assert!(validate_pdf(b"not a valid pdf").is_err());
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version(b"%PDF-1.7\n"), "1.7");
        assert_eq!(extract_version(b"%PDF-2.0\n"), "2.0");
        assert_eq!(extract_version(b"garbage!"), "1.4");
    }
}
