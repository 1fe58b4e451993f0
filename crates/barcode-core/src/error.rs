use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarcodeError {
    #[error("Barcode content cannot be empty")]
    EmptyContent,

    #[error("Character {character:?} cannot be encoded in {symbology}")]
    InvalidCharacter { character: char, symbology: String },

    #[error("Invalid length for {symbology}: {message}")]
    InvalidLength { symbology: String, message: String },

    #[error("Check digit mismatch: expected {expected}, got {found}")]
    ChecksumMismatch { expected: u8, found: u8 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Unknown symbology: {0}")]
    UnknownSymbology(String),

    #[error("Image encoding failed: {0}")]
    Encoding(String),
}
