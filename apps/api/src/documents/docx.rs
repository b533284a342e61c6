use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;

const DOCUMENT_XML: &str = "word/document.xml";
/// Upper bound on the decompressed body; guards against zip bombs.
const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

static BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("break pattern compiles")
});
static TAB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/>").expect("tab pattern compiles"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));

/// Paragraph text of a DOCX body, one paragraph per line.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::CorruptDocument(format!("Unreadable DOCX archive: {e}")))?;

    let entry = archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| AppError::CorruptDocument(format!("DOCX has no {DOCUMENT_XML}: {e}")))?;

    let mut xml = String::new();
    entry
        .take(MAX_DOCUMENT_XML_BYTES)
        .read_to_string(&mut xml)
        .map_err(|e| AppError::CorruptDocument(format!("Unreadable {DOCUMENT_XML}: {e}")))?;

    Ok(xml_to_text(&xml))
}

fn xml_to_text(xml: &str) -> String {
    let text = BREAK_RE.replace_all(xml, "\n");
    let text = TAB_RE.replace_all(&text, "\t");
    let text = TAG_RE.replace_all(&text, "");

    let decoded = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
