//! Core library for renaming legal PDF documents.
//!
//! This crate provides:
//! - PDF text extraction with a page-wise fallback
//! - Field extraction (CPF, contract number, person name, registry office)
//! - Output file naming with collision handling
//! - A per-category dispatcher and a sequential batch runner

pub mod error;
pub mod models;
pub mod pdf;
pub mod extraction;
pub mod naming;

pub use error::{ExtractionError, IdMiss, PdfError, RenpdfError, Result};
pub use models::config::RenpdfConfig;
pub use models::outcome::{
    DocumentCategory, ExtractedField, FieldStatus, OfficeCode, OutcomeStatus, RenameOutcome,
};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextSource, TextSource};
pub use extraction::{ExtractionMatch, FieldExtractor};
pub use naming::{
    BatchReport, CaseDispatcher, CollisionStyle, CopySink, Destination, FileNameResolver,
    FileSink, run_batch,
};
