use std::future::Future;

use bytes::Bytes;

pub trait DocumentParser {
    fn parse_text(&self, document: Bytes) -> impl Future<Output = Result<String, DocumentError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to parse PDF document: {0}")]
    Malformed(String),
    #[error("PDF parser aborted: {0}")]
    Aborted(String),
}

/// Extracts plain text from PDF bytes with `pdf-extract`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfParser;

impl DocumentParser for PdfParser {
    #[tracing::instrument(skip_all, fields(bytes = document.len()))]
    async fn parse_text(&self, document: Bytes) -> Result<String, DocumentError> {
        // CPU bound; a parser panic comes back as a JoinError
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&document))
            .await
            .map_err(|e| DocumentError::Aborted(e.to_string()))?
            .map_err(|e| DocumentError::Malformed(e.to_string()))
            .inspect_err(|e| tracing::error!(error = %e, "Failed to extract text from PDF"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_are_rejected() {
        let result = PdfParser
            .parse_text(Bytes::from_static(b"definitely not a pdf"))
            .await;
        assert!(result.is_err(), "expected error, got {result:?}");
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let result = PdfParser.parse_text(Bytes::new()).await;
        assert!(result.is_err());
    }
}
