//! Error types for the renpdf-core library.

use std::fmt;

use thiserror::Error;

/// Main error type for the renpdf library.
#[derive(Error, Debug)]
pub enum RenpdfError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Why no taxpayer ID could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdMiss {
    /// The primary anchor was present but its section held no valid ID.
    AfterPrimaryAnchor,
    /// No tier produced a checksum-valid ID.
    NoValidId,
}

impl fmt::Display for IdMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AfterPrimaryAnchor => f.write_str("no valid ID after the primary anchor"),
            Self::NoValidId => f.write_str("no valid ID found"),
        }
    }
}

/// Document-scoped extraction failures.
///
/// None of these stop a batch; each one becomes the status of a single
/// [`RenameOutcome`](crate::models::outcome::RenameOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The source had no extractable text.
    #[error("document has no extractable text")]
    NoText,

    /// No checksum-valid taxpayer ID.
    #[error("taxpayer ID not found ({0})")]
    IdNotFound(IdMiss),

    /// No 13-digit contract number.
    #[error("contract number not found")]
    ContractNotFound,

    /// No name after any of the anchors.
    #[error("name not found")]
    NameNotFound,

    /// Any other failure while processing one document.
    #[error("{0}")]
    Unexpected(String),
}

/// Result type for the renpdf library.
pub type Result<T> = std::result::Result<T, RenpdfError>;
