//! Text extraction — turns an uploaded resume document into raw text before scoring.
//!
//! PDF decoding is CPU-bound and `pdf-extract` may panic on malformed input, so it
//! runs on the blocking pool and a panic surfaces as an internal error.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::errors::ScanError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Pluggable document-to-text collaborator. Carried in `AppState` as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(
        &self,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, ScanError>;
}

/// Default extractor: PDF via `pdf-extract`, UTF-8 text passed through.
pub struct DocumentTextExtractor;

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract_text(
        &self,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, ScanError> {
        if bytes.is_empty() {
            return Err(ScanError::Extraction("uploaded document is empty".to_string()));
        }

        match DocumentKind::detect(&bytes, content_type) {
            DocumentKind::Pdf => extract_pdf(bytes).await,
            DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
                .map_err(|_| ScanError::Extraction("document is not valid UTF-8 text".to_string())),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Magic bytes win over the declared content type; browsers are loose with it.
    fn detect(bytes: &[u8], content_type: Option<&str>) -> Self {
        if bytes.starts_with(PDF_MAGIC) {
            return DocumentKind::Pdf;
        }
        match content_type.map(|ct| ct.to_ascii_lowercase()) {
            Some(ct) if ct.starts_with("application/pdf") => DocumentKind::Pdf,
            _ => DocumentKind::PlainText,
        }
    }
}

async fn extract_pdf(bytes: Bytes) -> Result<String, ScanError> {
    let size = bytes.len();
    let decoded = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| ScanError::Internal(format!("PDF decoder crashed: {e}")))?;

    let text = decoded.map_err(|e| ScanError::Extraction(format!("PDF decode failed: {e}")))?;
    debug!(bytes = size, chars = text.len(), "PDF text extracted");
    Ok(text)
}


/// Builds a one-page PDF (catalog, pages, page, content stream, Helvetica font)
/// whose page shows `text`. Offsets in the xref table are computed, not hard-coded.
#[cfg(test)]
pub(crate) fn single_page_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref_at = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    out.into_bytes()
}
