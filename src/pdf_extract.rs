// src/pdf_extract.rs

use crate::config::IngestConfig;
use crate::error::IngestError;
use lopdf::Document;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Extensions read as UTF-8 instead of going through the PDF path.
const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];

/// Fraction of image-only pages at which the whole PDF counts as scanned.
const SCANNED_PAGE_RATIO: f64 = 0.8;

/// Load a quote document from disk as plain text.
pub fn load_document(path: &Path, cfg: &IngestConfig) -> Result<String, IngestError> {
    let span = tracing::info_span!("document", path = %path.display());
    let _guard = span.enter();

    if !path.exists() {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }

    let io_err = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let is_plain_text = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            PLAIN_TEXT_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        });

    if is_plain_text {
        let text = fs::read_to_string(path).map_err(io_err)?;
        info!(chars = text.len(), "Read plain-text document");
        return require_text(text);
    }

    let bytes = fs::read(path).map_err(io_err)?;
    read_pdf(path, &bytes, cfg.min_text_chars)
}

/// Reject text that is empty or only whitespace; there is nothing to score.
pub fn require_text(text: String) -> Result<String, IngestError> {
    if text.trim().is_empty() {
        return Err(IngestError::Empty);
    }
    Ok(text)
}

/// Decode the text layer of a PDF.
///
/// Image-only documents, undecodable text layers and text layers with fewer
/// than `min_text_chars` visible characters all count as scanned.
fn read_pdf(path: &Path, bytes: &[u8], min_text_chars: usize) -> Result<String, IngestError> {
    let scanned = || IngestError::Scanned(path.to_path_buf());

    let doc = Document::load_mem(bytes).map_err(|e| IngestError::Pdf {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if looks_like_scanned(&doc) {
        info!("Pages carry images but no fonts");
        return Err(scanned());
    }

    let text = ::pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!(error = %e, "Text layer could not be decoded");
        scanned()
    })?;

    let visible = text.chars().filter(|c| !c.is_whitespace()).count();
    if visible < min_text_chars {
        info!(chars = visible, min = min_text_chars, "Text layer too thin");
        return Err(scanned());
    }
    info!(chars = visible, "Decoded PDF text layer");
    Ok(text)
}

/// Heuristic: inspect the PDF object tree for signs that every page
/// is just a single image with no text operators.
///
/// A page with XObject images but **no** Font resources is almost
/// certainly a scanned page.
fn looks_like_scanned(doc: &Document) -> bool {
    let pages = doc.get_pages();
    if pages.is_empty() {
        return false; // Can't tell — let text extraction try
    }

    let image_only_pages = pages
        .values()
        .filter(|&&object_id| {
            let Some(resources) = doc
                .get_object(object_id)
                .ok()
                .and_then(|page| page.as_dict().ok())
                .and_then(|page| page.get(b"Resources").ok())
                .and_then(|r| doc.dereference(r).ok())
                .and_then(|(_, resolved)| resolved.as_dict().ok())
            else {
                return false;
            };
            let has_entries = |key: &[u8]| {
                resources
                    .get(key)
                    .ok()
                    .and_then(|obj| doc.dereference(obj).ok())
                    .and_then(|(_, resolved)| resolved.as_dict().ok())
                    .is_some_and(|dict| !dict.is_empty())
            };
            has_entries(&b"XObject"[..]) && !has_entries(&b"Font"[..])
        })
        .count();

    let total = pages.len();
    let ratio = image_only_pages as f64 / total as f64;
    info!(
        total_pages = total,
        image_only = image_only_pages,
        ratio = format!("{ratio:.2}"),
        "Scanned-page analysis"
    );

    ratio >= SCANNED_PAGE_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_garbage_bytes() {
        let result = read_pdf(Path::new("junk.pdf"), b"this is not a pdf", 30);
        assert!(matches!(result, Err(IngestError::Pdf { .. })));
    }

    #[test]
    fn test_blank_plain_text_document() {
        for body in ["", "   \n\t\n"] {
            let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
            write!(file, "{body}").unwrap();

            let err = load_document(file.path(), &IngestConfig::default()).unwrap_err();
            assert!(matches!(err, IngestError::Empty), "{body:?}");
        }
    }

    #[test]
    fn test_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("quote1.pdf"), &IngestConfig::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::NotFound(_)));
    }

    #[test]
    fn test_plain_text_document() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Supplier Quote - Acme\nGrand Total: $9,000").unwrap();

        let text = load_document(file.path(), &IngestConfig::default()).unwrap();
        assert!(text.contains("Grand Total"));
    }

    #[test]
    fn test_corrupt_pdf_document() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-garbage").unwrap();

        let err = load_document(file.path(), &IngestConfig::default()).unwrap_err();
        assert!(matches!(err, IngestError::Pdf { .. }));
    }
}
