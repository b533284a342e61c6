// Document-to-text conversion for uploaded CVs. Output feeds `parsing`.

pub mod docx;
pub mod pdf;

use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Extension wins; the declared content type is the fallback.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, AppError> {
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        let by_extension = match extension.as_deref() {
            Some("pdf") => Some(Self::Pdf),
            Some("docx") => Some(Self::Docx),
            Some("txt") | Some("text") => Some(Self::PlainText),
            _ => None,
        };
        if let Some(kind) = by_extension {
            return Ok(kind);
        }

        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase());
        match mime.as_deref() {
            Some("application/pdf") => Ok(Self::Pdf),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
                Ok(Self::Docx)
            }
            Some("text/plain") => Ok(Self::PlainText),
            _ => Err(AppError::UnsupportedDocument(format!(
                "Expected a PDF, DOCX or plain-text CV (file: {}, content type: {})",
                file_name.unwrap_or("<unnamed>"),
                content_type.unwrap_or("<none>")
            ))),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::PlainText => "text/plain; charset=utf-8",
        }
    }
}

/// Converts document bytes to plain text. Empty output is a corrupt document.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, AppError> {
    let text = match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(bytes)?,
        DocumentKind::Docx => docx::extract_docx_text(bytes)?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    if text.trim().is_empty() {
        warn!(?kind, "Document produced no extractable text");
        return Err(AppError::CorruptDocument(
            "Document contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}
