use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::errors::AppError;

/// Text layer of an in-memory PDF. Scanned (image-only) PDFs come back empty.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    // pdf-extract panics on some malformed font and encoding tables.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            Err(AppError::CorruptDocument(format!("Unreadable PDF: {e}")))
        }
        Err(_) => {
            warn!("PDF extraction panicked");
            Err(AppError::CorruptDocument(
                "Unreadable PDF: malformed document structure".to_string(),
            ))
        }
    }
}
