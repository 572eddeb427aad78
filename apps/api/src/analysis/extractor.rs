//! Text Extractor — turns one uploaded PDF into a single cleaned string.
//!
//! Pages are joined in order with one blank line and the result is trimmed.
//! An empty result is an error: an image-only PDF is indistinguishable from
//! a corrupt one.

use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;

use thiserror::Error;

pub const PAGE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to extract text from PDF: {0}")]
    Parse(String),

    #[error("Failed to extract text from PDF: No text content found in the PDF")]
    Empty,

    #[error("Failed to read PDF upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Boundary to the PDF parsing library: raw bytes in, per-page text out.
pub trait PdfBackend: Send + Sync {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// Default backend built on `pdf-extract`.
pub struct PdfExtractBackend;

impl PdfBackend for PdfExtractBackend {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractionError::Parse(e.to_string()))
    }
}

#[derive(Clone)]
pub struct TextExtractor {
    backend: Arc<dyn PdfBackend>,
}

impl TextExtractor {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }

    /// Extracts the text of every page. The resource is left positioned at
    /// its start on return, whether or not extraction succeeded.
    pub fn extract<R: Read + Seek>(&self, resource: &mut R) -> Result<String, ExtractionError> {
        resource.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        let read = resource.read_to_end(&mut bytes);
        resource.seek(SeekFrom::Start(0))?;
        read?;

        let pages = self.backend.page_texts(&bytes)?;
        join_pages(&pages)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(Arc::new(PdfExtractBackend))
    }
}

fn join_pages(pages: &[String]) -> Result<String, ExtractionError> {
    let text = pages.join(PAGE_SEPARATOR).trim().to_string();
    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text)
}

/// Builds a minimal single-page PDF using the standard Helvetica font.
#[cfg(test)]
pub(crate) fn single_page_pdf(text: &str) -> Vec<u8> {
    let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
         /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    pdf
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct FakePages(Vec<&'static str>);

    impl PdfBackend for FakePages {
        fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    struct BrokenPdf;

    impl PdfBackend for BrokenPdf {
        fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Err(ExtractionError::Parse("Invalid PDF structure".to_string()))
        }
    }

    fn extractor(backend: impl PdfBackend + 'static) -> TextExtractor {
        TextExtractor::new(Arc::new(backend))
    }

    #[test]
    fn test_single_page_is_trimmed() {
        let text = extractor(FakePages(vec![
            "  Sample resume text\nJohn Doe\nSoftware Engineer\n\n",
        ]))
        .extract(&mut Cursor::new(b"%PDF-1.4".to_vec()))
        .unwrap();
        assert_eq!(text, "Sample resume text\nJohn Doe\nSoftware Engineer");
    }

    #[test]
    fn test_pages_joined_by_blank_line_in_order() {
        let text = extractor(FakePages(vec!["Page 1 content", "Page 2 content"]))
            .extract(&mut Cursor::new(Vec::new()))
            .unwrap();
        assert_eq!(text, "Page 1 content\n\nPage 2 content");
    }

    #[test]
    fn test_all_pages_empty_is_an_error() {
        let err = extractor(FakePages(vec!["", "  \n", ""]))
            .extract(&mut Cursor::new(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
        assert!(err.to_string().contains("No text content found"));
    }

    #[test]
    fn test_zero_pages_is_an_error() {
        let err = extractor(FakePages(vec![]))
            .extract(&mut Cursor::new(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let err = extractor(BrokenPdf)
            .extract(&mut Cursor::new(Vec::new()))
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Failed to extract text from PDF"));
    }

    #[test]
    fn test_read_position_restored_after_extraction() {
        let mut cursor = Cursor::new(b"%PDF-1.4 mock content".to_vec());
        cursor.set_position(5);
        extractor(FakePages(vec!["text"]))
            .extract(&mut cursor)
            .unwrap();
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::new(b"%PDF-1.4 mock content".to_vec());
        let _ = extractor(BrokenPdf).extract(&mut cursor);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_garbage_bytes_fail_with_real_backend() {
        let result = TextExtractor::default().extract(&mut Cursor::new(b"not a pdf".to_vec()));
        assert!(result.is_err());
    }

    #[test]
    fn test_real_backend_reads_generated_pdf() {
        let pdf = single_page_pdf("Experienced Python engineer");
        let text = TextExtractor::default()
            .extract(&mut Cursor::new(pdf))
            .unwrap();
        assert!(text.contains("Python"));
        assert_eq!(text, text.trim());
    }
}
