//! Text Extractor — uploaded PDF bytes to plain text.

use tracing::{debug, warn};

use crate::errors::AppError;

/// Extracts text from an uploaded PDF. Extraction is synchronous CPU work, so
/// it runs on the blocking pool. Unreadable PDFs are a caller error (400).
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    debug!("Extracting text from PDF ({} bytes)", bytes.len());

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| {
            warn!("PDF text extraction failed: {e}");
            AppError::Validation("Failed to extract text from PDF".to_string())
        })?;

    debug!("Extracted {} characters from PDF", text.len());
    Ok(text.trim().to_string())
}
