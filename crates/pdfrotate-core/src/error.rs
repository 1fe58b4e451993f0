use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotateError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Invalid page range: {0}")]
    InvalidRange(String),

    #[error("Page {page} does not exist (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },

    #[error("Invalid rotation: {0} degrees (must be a multiple of 90)")]
    InvalidRotation(i64),

    #[error("PDF operation failed: {0}")]
    OperationError(String),
}
