//! PDF processing module.

mod extractor;
#[cfg(test)]
mod fixtures;

pub use extractor::PdfExtractor;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Supplies the text of a document.
pub trait TextSource {
    /// Full text of the document at `path`. Empty text is not an error here.
    fn document_text(&self, path: &Path) -> crate::Result<String>;
}

/// Text source reading PDFs from disk.
#[derive(Debug, Clone, Default)]
pub struct PdfTextSource {
    config: PdfConfig,
}

impl PdfTextSource {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }

    fn page_by_page<P: PdfProcessor>(&self, processor: &P) -> String {
        let mut parts = Vec::new();
        for page in 1..=processor.page_count() {
            match processor.extract_page_text(page) {
                Ok(text) => parts.push(text),
                Err(e) => warn!("Failed to extract text from page {}: {}", page, e),
            }
        }
        parts.join("\n")
    }

    /// Whole-document text of a loaded PDF, retried page by page when it
    /// fails or comes back blank and the fallback is enabled.
    fn text_of<P: PdfProcessor>(&self, processor: &P, path: &Path) -> crate::Result<String> {
        let text = match processor.extract_text() {
            Ok(text) => text.trim().to_string(),
            Err(e) if self.config.page_fallback => {
                warn!("Whole-document extraction failed for {}: {}", path.display(), e);
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        if text.is_empty() && self.config.page_fallback {
            debug!("Falling back to page-wise extraction for {}", path.display());
            return Ok(self.page_by_page(processor).trim().to_string());
        }

        Ok(text)
    }
}

impl TextSource for PdfTextSource {
    fn document_text(&self, path: &Path) -> crate::Result<String> {
        let data = fs::read(path)?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;

        self.text_of(&extractor, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenpdfError;

    #[test]
    fn test_missing_file_is_io_error() {
        let source = PdfTextSource::default();
        let err = source
            .document_text(Path::new("/definitely/not/here.pdf"))
            .unwrap_err();
        assert!(matches!(err, RenpdfError::Io(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfTextSource::default().document_text(&path).unwrap_err();
        assert!(matches!(err, RenpdfError::Pdf(PdfError::Parse(_))));
    }

    /// Processor with scripted whole-document and per-page results.
    struct ScriptedPdf {
        whole: Option<&'static str>,
        pages: Vec<Option<&'static str>>,
    }

    impl PdfProcessor for ScriptedPdf {
        fn load(&mut self, _data: &[u8]) -> Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn extract_text(&self) -> Result<String> {
            self.whole
                .map(str::to_string)
                .ok_or_else(|| PdfError::TextExtraction("broken font".to_string()))
        }

        fn extract_page_text(&self, page: u32) -> Result<String> {
            self.pages[page as usize - 1]
                .map(str::to_string)
                .ok_or_else(|| PdfError::TextExtraction(format!("page {}", page)))
        }
    }

    #[test]
    fn test_reads_text_from_generated_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contract.pdf");
        fs::write(
            &path,
            super::fixtures::build_pdf(&[&[
                "CONTRATO No. 1234567890123",
                "COMPRADOR E DEVEDOR/FIDUCIANTE: ANA, CPF 111.444.777-35",
            ]]),
        )
        .unwrap();

        let text = PdfTextSource::default().document_text(&path).unwrap();
        assert!(text.contains("1234567890123"), "{text}");
        assert!(text.contains("FIDUCIANTE"), "{text}");
        assert!(text.contains("111.444.777-35"), "{text}");
    }

    #[test]
    fn test_page_fallback_after_whole_document_failure() {
        let pdf = ScriptedPdf {
            whole: None,
            pages: vec![Some("CONTRATO"), None, Some("DEVEDOR ")],
        };

        let text = PdfTextSource::default().text_of(&pdf, Path::new("a.pdf")).unwrap();
        assert_eq!(text, "CONTRATO\nDEVEDOR");
    }

    #[test]
    fn test_page_fallback_after_blank_text() {
        let pdf = ScriptedPdf {
            whole: Some("  \n "),
            pages: vec![Some("EM NOME DE ANA")],
        };

        let text = PdfTextSource::default().text_of(&pdf, Path::new("a.pdf")).unwrap();
        assert_eq!(text, "EM NOME DE ANA");
    }

    #[test]
    fn test_whole_text_wins_over_pages() {
        let pdf = ScriptedPdf {
            whole: Some(" CONTRATO 1 \n"),
            pages: vec![Some("ignored")],
        };

        let text = PdfTextSource::default().text_of(&pdf, Path::new("a.pdf")).unwrap();
        assert_eq!(text, "CONTRATO 1");
    }

    #[test]
    fn test_no_fallback_when_disabled() {
        let source = PdfTextSource::new(PdfConfig { page_fallback: false });
        let failing = ScriptedPdf {
            whole: None,
            pages: vec![Some("CONTRATO")],
        };
        let blank = ScriptedPdf {
            whole: Some(""),
            pages: vec![Some("CONTRATO")],
        };

        let err = source.text_of(&failing, Path::new("a.pdf")).unwrap_err();
        assert!(matches!(err, RenpdfError::Pdf(PdfError::TextExtraction(_))));
        assert_eq!(source.text_of(&blank, Path::new("b.pdf")).unwrap(), "");
    }
}
